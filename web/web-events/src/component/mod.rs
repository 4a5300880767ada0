mod event_row;

pub use event_row::*;
