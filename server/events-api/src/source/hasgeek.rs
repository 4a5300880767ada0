use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use scraper::Html;

use super::{absolute_url, fetch_html, first_text, selector, text_of, Listing};

const NO_PAST_PROJECTS: &str = "No past projects";

/// Upcoming event of a hasgeek account, else its most recent past project.
pub async fn scrape(client: &Client, base: &str, slug: &str) -> Result<Option<Listing>> {
    let account = fetch_html(client, &format!("{base}/{slug}")).await?;
    if let Some(listing) = parse_upcoming(&account, base)? {
        return Ok(Some(listing));
    }

    let past = fetch_html(client, &format!("{base}/{slug}/past.projects?page=1")).await?;
    parse_past(&past, base)
}

/// The upcoming card, when it carries a time. Display date is `Wed, Jan 10, 2024, 6:30 PM`.
pub fn parse_upcoming(body: &str, base: &str) -> Result<Option<Listing>> {
    let document = Html::parse_document(body);
    let Some(card) = document.select(&selector("a.card--upcoming")?).next() else {
        return Ok(None);
    };
    let Some(time) = first_text(card, "span.calendar__weekdays__dates__time")? else {
        return Ok(None);
    };

    let name = card
        .value()
        .attr("data-cy-title")
        .context("upcoming card without title")?
        .trim()
        .to_string();
    let href = card.value().attr("href").context("upcoming card without href")?;

    let active_day = card
        .select(&selector("p.calendar__weekdays__dates__date--active")?)
        .next()
        .context("upcoming card without an active day")?;
    let day_name =
        first_text(active_day, "span.calendar__weekdays__dates__date__name")?.unwrap_or_default();
    let day = first_text(active_day, "span.calendar__weekdays__dates__date__day")?
        .context("active day without a day number")?;

    let month_year = first_text(card, "span.calendar__month__name")?
        .context("upcoming card without month")?;
    let mut month_year = month_year.split_whitespace();
    let month = month_year.next().context("month name missing")?;
    let year = month_year.next().context("year missing")?;

    Ok(Some(Listing {
        name,
        date: format!("{day_name}, {month} {day}, {year}, {time}"),
        url: absolute_url(base, href),
        starts_at: parse_day(&format!("{day} {month} {year}"))?,
    }))
}

/// First project on the past projects page: a date paragraph followed by a titled link.
pub fn parse_past(body: &str, base: &str) -> Result<Option<Listing>> {
    let document = Html::parse_document(body);
    let paragraph = selector("p")?;
    let mut paragraphs = document.select(&paragraph);

    let Some(date) = paragraphs.next().map(text_of) else {
        return Ok(None);
    };
    if date == NO_PAST_PROJECTS {
        return Ok(None);
    }

    let title = paragraphs.next().context("past project without title")?;
    let link = title
        .select(&selector("a")?)
        .next()
        .context("past project title without link")?;
    let href = link.value().attr("href").context("past project without href")?;

    Ok(Some(Listing {
        name: text_of(link),
        starts_at: parse_day(&date)?,
        date,
        url: absolute_url(base, href),
    }))
}

/// `10 Jan 2024`, at midnight UTC.
fn parse_day(day: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(day, "%d %b %Y")
        .with_context(|| format!("unrecognized hasgeek date {day:?}"))?;
    Ok(date
        .and_hms_opt(0, 0, 0)
        .context("midnight out of range")?
        .and_utc())
}
