use std::sync::Arc;

use axum::Extension;
use common::Event;

use crate::{
    extract::{error::AppError, response::JsonResponse},
    service::cache::EventCache,
};

#[axum::debug_handler]
pub async fn list(
    Extension(cache): Extension<Arc<EventCache>>,
) -> Result<JsonResponse<Arc<Vec<Event>>>, AppError> {
    let events = cache.events().await.map_err(AppError::Unavailable)?;
    Ok(JsonResponse::new(events))
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;
    use crate::config::{Community, Platform, Sources};
    use crate::source::http_client;
    use axum::{http::StatusCode, response::IntoResponse};

    const LUMA_PAGE: &str = r#"
        <html><head><script type="application/ld+json">{"@id":"https://lu.ma/jan","startDate":"2024-01-20T10:30:00Z"}</script></head>
        <body><h1 class="title">Rust Mumbai January</h1></body></html>
    "#;

    fn cache(origin: &str) -> Arc<EventCache> {
        Arc::new(EventCache::new(
            http_client(Duration::from_secs(5)).expect("client should build"),
            Sources::single(origin),
            vec![Community {
                slug: "rust-mumbai-2".to_string(),
                name: "Rust Mumbai".to_string(),
                platform: Platform::Luma,
            }],
            Duration::from_secs(3600),
        ))
    }

    #[test]
    fn test_list_returns_json_array() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/rust-mumbai-2")
            .with_body(LUMA_PAGE)
            .create();
        let cache = cache(&server.url());

        tokio_test::block_on(async {
            let response = match list(Extension(cache)).await {
                Ok(body) => body.into_response(),
                Err(e) => e.into_response(),
            };
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response.headers()["content-type"],
                "application/json; charset=utf-8"
            );

            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("body should be readable");
            let json: serde_json::Value =
                serde_json::from_slice(&body).expect("body should be json");

            let events = json.as_array().expect("body should be an array");
            assert_eq!(events.len(), 1);
            assert_eq!(events[0]["name"], "Rust Mumbai January");
            assert_eq!(events[0]["community"], "Rust Mumbai");
            assert_eq!(events[0]["date"], "Sat, Jan 20, 2024, 04:00 PM IST");
            assert_eq!(events[0]["url"], "https://lu.ma/jan");
            assert_eq!(events[0]["sort_date"], "2024-01-20 10:30:00 UTC");
        });
        mock.assert();
    }

    #[test]
    fn test_list_unavailable_when_scraping_fails() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/rust-mumbai-2")
            .with_status(500)
            .create();
        let cache = cache(&server.url());

        let status = tokio_test::block_on(async {
            match list(Extension(cache)).await {
                Ok(body) => body.into_response().status(),
                Err(e) => e.into_response().status(),
            }
        });

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        mock.assert();
    }
}
