use std::{
    convert::Infallible,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    response::Response,
    routing::{future::RouteFuture, Route},
};
use futures::ready;
use tower_layer::Layer;
use tower_service::Service;

const NO_CACHE: HeaderValue = HeaderValue::from_static("max-age=0, no-cache, no-store");
const CACHE_IMMUTABLE: HeaderValue = HeaderValue::from_static("max-age=31536000, immutable");
const CACHE_MUTABLE: HeaderValue = HeaderValue::from_static("max-age=0, must-revalidate");

/// Sets `Cache-Control` on static files by media type.
#[derive(Clone, Copy)]
pub struct WebCache;
#[derive(Clone)]
pub struct WebCacheService(Route);
pub struct WebCacheFuture(RouteFuture<Infallible>);

impl Layer<Route> for WebCache {
    type Service = WebCacheService;

    fn layer(&self, inner: Route) -> Self::Service {
        WebCacheService(inner)
    }
}

impl Service<Request> for WebCacheService {
    type Response = Response;
    type Error = Infallible;
    type Future = WebCacheFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        WebCacheFuture(self.0.call(req))
    }
}

impl Future for WebCacheFuture {
    type Output = Result<Response, Infallible>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut response = match ready!(Pin::new(&mut self.0).poll(cx)) {
            Ok(response) => response,
            Err(never) => match never {},
        };

        if response.status() == StatusCode::OK {
            let headers = response.headers_mut();
            let cache_control = cache_control_for(
                headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|header| header.to_str().ok()),
            );
            headers.insert(header::CACHE_CONTROL, cache_control);
        }

        Poll::Ready(Ok(response))
    }
}

fn cache_control_for(content_type: Option<&str>) -> HeaderValue {
    let media_type = content_type.map(|value| value.split(';').next().unwrap_or(value).trim());

    match media_type {
        // index.html
        Some("text/html") => NO_CACHE,

        // trunk hashes the names of these
        Some("text/css")
        | Some("text/javascript")
        | Some("application/javascript")
        | Some("application/wasm") => CACHE_IMMUTABLE,

        _ => CACHE_MUTABLE,
    }
}
