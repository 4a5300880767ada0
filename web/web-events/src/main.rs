pub(crate) mod api;
pub(crate) mod component;
pub(crate) mod config;
pub(crate) mod page;

use crate::config::{ApiOrigin, CONTAINER_ID};
use crate::page::*;
use thiserror::Error;
use web_sys::{window, Element};

#[derive(Debug, Error)]
enum MountError {
    #[error("window not found")]
    NoWindow,
    #[error("document not found")]
    NoDocument,
    #[error("container #{0} not found")]
    MissingContainer(&'static str),
}

fn event_container() -> Result<Element, MountError> {
    let document = window()
        .ok_or(MountError::NoWindow)?
        .document()
        .ok_or(MountError::NoDocument)?;
    container_by_id(|id| document.get_element_by_id(id))
}

fn container_by_id<T>(lookup: impl FnOnce(&str) -> Option<T>) -> Result<T, MountError> {
    lookup(CONTAINER_ID).ok_or(MountError::MissingContainer(CONTAINER_ID))
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());

    let origin = ApiOrigin::current();
    log::info!("events api: {}", origin.events_url());

    match event_container() {
        Ok(container) => {
            yew::Renderer::<EventsPage>::with_root_and_props(container, EventsPageProps { origin })
                .render();
        }
        Err(e) => log::error!("mount events list error: {e}"),
    }
}
