use std::rc::Rc;

use common::Event;
use yew::prelude::*;

pub const ROW_CLASS: &str = "row";
pub const NAME_CELL_CLASS: &str = "col py-2 border-bottom-secondary-subtle";
pub const COMMUNITY_CELL_CLASS: &str = "col-3 py-2 border-bottom-secondary-subtle";
pub const DATE_CELL_CLASS: &str = "col-4 py-2 px-2 border-bottom-secondary-subtle";
pub const REGISTER_CELL_CLASS: &str = "col-2 py-2 border-bottom-secondary-subtle";

#[derive(PartialEq, Properties)]
pub struct EventRowProps {
    pub event: Event,
}

/// One row: name, community, date, registration link.
#[function_component]
pub fn EventRow(props: &EventRowProps) -> Html {
    let event = &props.event;

    html! {
        <div class={ROW_CLASS}>
            <div class={NAME_CELL_CLASS}>{event.name.clone()}</div>
            <div class={COMMUNITY_CELL_CLASS}>{event.community.clone()}</div>
            <div class={DATE_CELL_CLASS}>{event.date.clone()}</div>
            <div class={REGISTER_CELL_CLASS}>
                <a href={event.url.clone()} target="_blank">{"Register"}</a>
            </div>
        </div>
    }
}

#[derive(PartialEq, Properties)]
pub struct EventRowsProps {
    pub events: Rc<Vec<Event>>,
}

/// Rows in input order, duplicates included.
#[function_component]
pub fn EventRows(props: &EventRowsProps) -> Html {
    props
        .events
        .iter()
        .map(|event| html! { <EventRow event={event.clone()} /> })
        .collect::<Html>()
}
