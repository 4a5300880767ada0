pub mod web_cache;

pub use web_cache::WebCache;
