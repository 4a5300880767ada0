use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use scraper::Html;

use super::{absolute_url, fetch_html, first_text, selector, text_of, Listing};

/// Next upcoming event of a meetup group, or its latest past one when nothing is scheduled.
pub async fn scrape(client: &Client, base: &str, slug: &str) -> Result<Option<Listing>> {
    let upcoming = fetch_html(client, &format!("{base}/{slug}/events/")).await?;
    if let Some(listing) = parse_upcoming(&upcoming, base)? {
        return Ok(Some(listing));
    }

    let group = fetch_html(client, &format!("{base}/{slug}/")).await?;
    parse_past(&group, base)
}

pub fn parse_upcoming(body: &str, base: &str) -> Result<Option<Listing>> {
    let document = Html::parse_document(body);
    let Some(card) = document.select(&selector(".eventCard")?).next() else {
        return Ok(None);
    };

    let link = card
        .select(&selector(".eventCard--link")?)
        .next()
        .context("event card without link")?;
    let href = link.value().attr("href").context("event link without href")?;
    let date = first_text(card, "time")?.context("event card without time")?;

    Ok(Some(Listing {
        name: text_of(link),
        starts_at: parse_date(&date)?,
        date,
        url: absolute_url(base, href),
    }))
}

pub fn parse_past(body: &str, base: &str) -> Result<Option<Listing>> {
    let document = Html::parse_document(body);
    let Some(card) = document
        .select(&selector(r#"a[data-event-label="past-event-card-1"]"#)?)
        .next()
    else {
        return Ok(None);
    };

    let href = card.value().attr("href").context("past event without href")?;
    let date = first_text(card, "time")?.context("past event without time")?;
    let name = first_text(card, "span")?.context("past event without title")?;

    Ok(Some(Listing {
        name,
        starts_at: parse_date(&date)?,
        date,
        url: absolute_url(base, href),
    }))
}

/// `Wed, Jan 10, 2024, 6:30 PM IST`. The zone name is dropped and the time read as UTC.
fn parse_date(date: &str) -> Result<DateTime<Utc>> {
    let date = date.trim();
    let without_zone = match date.rsplit_once(' ') {
        Some((head, zone))
            if zone.chars().all(|c| c.is_ascii_alphabetic())
                && !zone.eq_ignore_ascii_case("AM")
                && !zone.eq_ignore_ascii_case("PM") =>
        {
            head
        }
        _ => date,
    };

    let naive = NaiveDateTime::parse_from_str(without_zone, "%a, %b %d, %Y, %I:%M %p")
        .with_context(|| format!("unrecognized meetup date {date:?}"))?;
    Ok(naive.and_utc())
}
