use common::Event;
use gloo_net::http::Request;
use thiserror::Error;

use crate::config::ApiOrigin;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to events api failed: {0}")]
    Network(#[source] gloo_net::Error),
    #[error("events api returned an unreadable body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// `GET {origin}/api/`. The status code is not checked, any JSON array of events is accepted.
pub async fn fetch_events(origin: ApiOrigin) -> Result<Vec<Event>, LoadError> {
    let body = Request::get(&origin.events_url())
        .send()
        .await
        .map_err(LoadError::Network)?
        .text()
        .await
        .map_err(LoadError::Network)?;

    decode_events(&body)
}

fn decode_events(body: &str) -> Result<Vec<Event>, LoadError> {
    serde_json::from_str(body).map_err(LoadError::Decode)
}
