use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use common::Event;
use reqwest::Client;
use scraper::{ElementRef, Selector};
use tracing::debug;

pub mod hasgeek;
pub mod luma;
pub mod meetup;

/// One event as found on a community page, before the community name is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub name: String,
    pub date: String,
    pub url: String,
    pub starts_at: DateTime<Utc>,
}

impl Listing {
    pub fn into_event(self, community: &str) -> (DateTime<Utc>, Event) {
        let event = Event {
            name: self.name,
            community: community.to_string(),
            date: self.date,
            url: self.url,
            sort_date: self.starts_at.to_string(),
        };
        (self.starts_at, event)
    }
}

/// Client shared by every scraper. `timeout` bounds each whole request, so a source that
/// stops answering fails instead of stalling the refresh.
pub fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
        .context("failed to build http client")
}

pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    debug!("fetching {url}");
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(body)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {css}: {e:?}"))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(scope: ElementRef<'_>, css: &str) -> Result<Option<String>> {
    Ok(scope.select(&selector(css)?).next().map(text_of))
}

/// Joins a relative href onto the platform origin; absolute hrefs pass through.
fn absolute_url(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}
