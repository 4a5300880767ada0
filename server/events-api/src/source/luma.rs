use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use reqwest::Client;
use scraper::Html;
use serde::Deserialize;

use super::{fetch_html, first_text, Listing};

// +05:30
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

#[derive(Debug, Deserialize)]
struct StructuredEvent {
    #[serde(rename = "startDate")]
    start_date: Option<String>,
    #[serde(rename = "@id")]
    id: Option<String>,
}

pub async fn scrape(client: &Client, base: &str, slug: &str) -> Result<Option<Listing>> {
    let url = format!("{base}/{slug}");
    let body = fetch_html(client, &url).await?;
    parse_event(&body, &url).map(Some)
}

/// Title from `h1.title`, start and link from the page's JSON-LD. `page_url` stands in
/// when the JSON-LD has no `@id`.
pub fn parse_event(body: &str, page_url: &str) -> Result<Listing> {
    let document = Html::parse_document(body);
    let root = document.root_element();

    let name = first_text(root, "h1.title")?.context("event page without title")?;
    let structured = first_text(root, r#"script[type="application/ld+json"]"#)?
        .context("event page without structured data")?;
    let structured: StructuredEvent =
        serde_json::from_str(&structured).context("decode structured data")?;

    let start_date = structured
        .start_date
        .context("structured data without startDate")?;
    let starts_at = DateTime::parse_from_rfc3339(&start_date)
        .with_context(|| format!("unrecognized startDate {start_date:?}"))?
        .with_timezone(&Utc);

    let ist = FixedOffset::east_opt(IST_OFFSET_SECS).context("invalid IST offset")?;
    let date = format!(
        "{} IST",
        starts_at.with_timezone(&ist).format("%a, %b %e, %Y, %I:%M %p")
    );

    Ok(Listing {
        name,
        date,
        url: structured.id.unwrap_or_else(|| page_url.to_string()),
        starts_at,
    })
}
