use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use common::Event;
use reqwest::Client;
use tracing::{info, warn};

use crate::config::{Community, Platform, Sources};
use crate::source::{hasgeek, luma, meetup, Listing};

async fn scrape_community(
    client: &Client,
    sources: &Sources,
    community: &Community,
) -> Result<Option<Listing>> {
    match community.platform {
        Platform::Meetup => meetup::scrape(client, &sources.meetup, &community.slug).await,
        Platform::Hasgeek => hasgeek::scrape(client, &sources.hasgeek, &community.slug).await,
        Platform::Luma => luma::scrape(client, &sources.luma, &community.slug).await,
    }
}

/// An event with the instant it is sorted by.
pub type Dated = (DateTime<Utc>, Event);

/// Scrapes every community, newest event first. A community that fails keeps its
/// entries from `previous`; only when all of them fail is the whole collection an error.
pub async fn collect(
    client: &Client,
    sources: &Sources,
    communities: &[Community],
    previous: &[Dated],
) -> Result<Vec<Dated>> {
    let mut events = Vec::with_capacity(communities.len());
    let mut failures = 0;

    for community in communities {
        match scrape_community(client, sources, community).await {
            Ok(Some(listing)) => events.push(listing.into_event(&community.name)),
            Ok(None) => info!("{}: no event listed", community.name),
            Err(e) => {
                failures += 1;
                let kept = previous
                    .iter()
                    .filter(|(_, event)| event.community == community.name)
                    .cloned()
                    .collect::<Vec<_>>();
                warn!(
                    "{}: scrape failed, keeping {} previous events: {e:?}",
                    community.name,
                    kept.len()
                );
                events.extend(kept);
            }
        }
    }

    if failures > 0 && failures == communities.len() {
        bail!("scraping failed for all {failures} communities");
    }
    if failures > 0 {
        warn!(
            "{failures} of {} communities failed to scrape",
            communities.len()
        );
    }

    info!(
        "collected {} events from {} communities",
        events.len(),
        communities.len()
    );
    Ok(newest_first(events))
}

fn newest_first(mut events: Vec<Dated>) -> Vec<Dated> {
    events.sort_by(|(a, _), (b, _)| b.cmp(a));
    events
}
