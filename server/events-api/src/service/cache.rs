use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use common::Event;
use reqwest::Client;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::config::{Community, Sources};

use super::aggregate::{self, Dated};

struct Snapshot {
    fetched_at: Instant,
    dated: Vec<Dated>,
    events: Arc<Vec<Event>>,
}

/// Aggregated events, scraped again once older than `refresh`.
///
/// The lock is held while scraping, so requests arriving during a refresh wait for it
/// instead of starting their own. A failed refresh also restarts the interval.
pub struct EventCache {
    client: Client,
    sources: Sources,
    communities: Vec<Community>,
    refresh: Duration,
    snapshot: Mutex<Option<Snapshot>>,
}

impl EventCache {
    pub fn new(
        client: Client,
        sources: Sources,
        communities: Vec<Community>,
        refresh: Duration,
    ) -> Self {
        Self {
            client,
            sources,
            communities,
            refresh,
            snapshot: Mutex::new(None),
        }
    }

    pub async fn events(&self) -> Result<Arc<Vec<Event>>> {
        let mut snapshot = self.snapshot.lock().await;
        if let Some(current) = snapshot.as_ref() {
            if current.fetched_at.elapsed() < self.refresh {
                return Ok(current.events.clone());
            }
        }

        info!("refreshing events from {} communities", self.communities.len());
        let previous = snapshot
            .as_ref()
            .map(|current| current.dated.as_slice())
            .unwrap_or_default();
        let collected =
            aggregate::collect(&self.client, &self.sources, &self.communities, previous).await;
        match collected {
            Ok(dated) => {
                let events: Arc<Vec<Event>> =
                    Arc::new(dated.iter().map(|(_, event)| event.clone()).collect());
                *snapshot = Some(Snapshot {
                    fetched_at: Instant::now(),
                    dated,
                    events: Arc::clone(&events),
                });
                Ok(events)
            }
            Err(e) => match snapshot.as_mut() {
                Some(stale) => {
                    warn!(
                        "refresh failed, serving previous events for another {:?}: {e:?}",
                        self.refresh
                    );
                    stale.fetched_at = Instant::now();
                    Ok(stale.events.clone())
                }
                None => Err(e),
            },
        }
    }
}

#[cfg(test)]
mod test {
    use std::net::TcpListener;
    use std::thread;

    use super::*;
    use crate::config::Platform;
    use crate::source::http_client;

    const LUMA_PAGE: &str = r#"
        <html><head><script type="application/ld+json">{"@id":"https://lu.ma/jan","startDate":"2024-01-20T10:30:00Z"}</script></head>
        <body><h1 class="title">Rust Mumbai January</h1></body></html>
    "#;

    const MEETUP_PAGE: &str = r#"
        <html><body><div class="eventCard">
          <a class="eventCard--link" href="/rustdelhi/events/1/">Rust Delhi February</a>
          <time>Sat, Feb 10, 2024, 10:00 AM IST</time>
        </div></body></html>
    "#;

    fn mumbai() -> Vec<Community> {
        vec![Community {
            slug: "rust-mumbai-2".to_string(),
            name: "Rust Mumbai".to_string(),
            platform: Platform::Luma,
        }]
    }

    fn cache(origin: &str, communities: Vec<Community>, refresh: Duration) -> EventCache {
        let client = http_client(Duration::from_secs(5)).expect("client should build");
        EventCache::new(client, Sources::single(origin), communities, refresh)
    }

    #[test]
    fn test_serves_cached_events_within_refresh() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/rust-mumbai-2")
            .with_body(LUMA_PAGE)
            .expect(1)
            .create();

        let cache = cache(&server.url(), mumbai(), Duration::from_secs(3600));

        tokio_test::block_on(async {
            let first = cache.events().await.expect("first load should scrape");
            let second = cache.events().await.expect("second load should hit cache");
            assert_eq!(first.len(), 1);
            assert!(Arc::ptr_eq(&first, &second));
        });
        mock.assert();
    }

    #[test]
    fn test_refreshes_after_interval() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/rust-mumbai-2")
            .with_body(LUMA_PAGE)
            .expect(2)
            .create();

        let cache = cache(&server.url(), mumbai(), Duration::ZERO);

        tokio_test::block_on(async {
            cache.events().await.expect("first load should scrape");
            cache.events().await.expect("expired cache should scrape again");
        });
        mock.assert();
    }

    #[test]
    fn test_failed_refresh_keeps_previous_events() {
        let mut server = mockito::Server::new();
        let cache = cache(&server.url(), mumbai(), Duration::ZERO);

        tokio_test::block_on(async {
            let ok = server
                .mock("GET", "/rust-mumbai-2")
                .with_body(LUMA_PAGE)
                .expect(1)
                .create_async()
                .await;
            let first = cache.events().await.expect("first load should scrape");
            ok.assert_async().await;
            ok.remove_async().await;

            let failing = server
                .mock("GET", "/rust-mumbai-2")
                .with_status(502)
                .create_async()
                .await;
            let second = cache.events().await.expect("stale events are served");

            assert_eq!(first, second);
            failing.assert_async().await;
        });
    }

    #[test]
    fn test_first_load_failure_is_error() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/rust-mumbai-2")
            .with_status(502)
            .create();

        let cache = cache(&server.url(), mumbai(), Duration::ZERO);
        assert!(tokio_test::block_on(cache.events()).is_err());
        mock.assert();
    }

    #[test]
    fn test_failed_refresh_waits_for_next_interval() {
        let mut server = mockito::Server::new();
        let cache = cache(&server.url(), mumbai(), Duration::from_millis(300));

        tokio_test::block_on(async {
            let ok = server
                .mock("GET", "/rust-mumbai-2")
                .with_body(LUMA_PAGE)
                .expect(1)
                .create_async()
                .await;
            let first = cache.events().await.expect("first load should scrape");
            ok.assert_async().await;
            ok.remove_async().await;

            tokio::time::sleep(Duration::from_millis(400)).await;
            let failing = server
                .mock("GET", "/rust-mumbai-2")
                .with_status(502)
                .expect(1)
                .create_async()
                .await;
            for _ in 0..3 {
                let events = cache.events().await.expect("stale events are served");
                assert_eq!(events, first);
            }
            failing.assert_async().await;
        });
    }

    #[test]
    fn test_partial_failure_keeps_previous_events() {
        let mut server = mockito::Server::new();
        let mut communities = mumbai();
        communities.push(Community {
            slug: "rustdelhi".to_string(),
            name: "Rust Delhi".to_string(),
            platform: Platform::Meetup,
        });
        let cache = cache(&server.url(), communities, Duration::ZERO);

        tokio_test::block_on(async {
            let luma = server
                .mock("GET", "/rust-mumbai-2")
                .with_body(LUMA_PAGE)
                .expect(2)
                .create_async()
                .await;
            let meetup = server
                .mock("GET", "/rustdelhi/events/")
                .with_body(MEETUP_PAGE)
                .expect(1)
                .create_async()
                .await;
            let first = cache.events().await.expect("first load should scrape");
            assert_eq!(first.len(), 2);
            meetup.assert_async().await;
            meetup.remove_async().await;

            let broken = server
                .mock("GET", "/rustdelhi/events/")
                .with_status(500)
                .create_async()
                .await;
            let second = cache.events().await.expect("one failing source is skipped");

            assert_eq!(second, first);
            luma.assert_async().await;
            broken.assert_async().await;
        });
    }

    #[test]
    fn test_unresponsive_source_times_out() {
        // accepts connections and never answers
        let listener = TcpListener::bind("127.0.0.1:0").expect("listener should bind");
        let origin = format!("http://{}", listener.local_addr().expect("bound address"));
        thread::spawn(move || {
            let mut held = Vec::new();
            for stream in listener.incoming() {
                held.push(stream);
            }
        });

        let client = http_client(Duration::from_millis(200)).expect("client should build");
        let cache = EventCache::new(client, Sources::single(&origin), mumbai(), Duration::ZERO);

        let result = tokio_test::block_on(async {
            tokio::time::timeout(Duration::from_secs(10), cache.events())
                .await
                .expect("refresh should give up on its own")
        });
        assert!(result.is_err());
    }
}
