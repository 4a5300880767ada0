use std::rc::Rc;

use common::Event;
use yew::prelude::*;

use crate::api::{fetch_events, LoadError};
use crate::component::*;
use crate::config::ApiOrigin;

/// Rows shown in the container. Appending never clears what is already there.
#[derive(Debug, Default, PartialEq)]
pub struct EventList {
    pub rows: Rc<Vec<Event>>,
}

pub enum EventListAction {
    Append(Vec<Event>),
}

impl Reducible for EventList {
    type Action = EventListAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            EventListAction::Append(events) => {
                if events.is_empty() {
                    return self;
                }
                let mut rows = Vec::with_capacity(self.rows.len() + events.len());
                rows.extend(self.rows.iter().cloned());
                rows.extend(events);
                Rc::new(Self {
                    rows: Rc::new(rows),
                })
            }
        }
    }
}

/// Turns the outcome of the load into a render step. A failed load renders nothing.
pub fn on_events_loaded(result: Result<Vec<Event>, LoadError>) -> Option<EventListAction> {
    match result {
        Ok(events) => {
            log::info!("loaded {} events", events.len());
            Some(EventListAction::Append(events))
        }
        Err(e) => {
            log::error!("load events error: {e}");
            None
        }
    }
}

#[derive(PartialEq, Properties)]
pub struct EventsPageProps {
    pub origin: ApiOrigin,
}

#[function_component]
pub fn EventsPage(props: &EventsPageProps) -> Html {
    let list = use_reducer(EventList::default);

    {
        let dispatcher = list.dispatcher();
        use_effect_with(props.origin, move |origin| {
            let origin = *origin;
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(action) = on_events_loaded(fetch_events(origin).await) {
                    dispatcher.dispatch(action);
                }
            });
        });
    }

    html! {
        <EventRows events={list.rows.clone()} />
    }
}
