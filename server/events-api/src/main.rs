use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use axum::{http::Method, routing::get, Extension, Router};
use clap::Parser;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod extract;
pub mod handler;
pub mod middleware;
pub mod service;
pub mod source;

use crate::config::{default_communities, load_communities, Sources};
use crate::middleware::WebCache;
use crate::service::cache::EventCache;
use crate::source::http_client;

#[derive(Parser, Debug)]
#[command(about = "Serves upcoming Rust community events in India")]
struct ProgramArgs {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:3000")]
    listen: SocketAddr,
    /// Minutes before the scraped events are considered stale.
    #[arg(long, default_value_t = 60)]
    refresh_minutes: u64,
    /// Seconds before a request to a community page is abandoned.
    #[arg(long, default_value_t = 20)]
    fetch_timeout_secs: u64,
    /// JSON file replacing the built-in community table.
    #[arg(long)]
    communities: Option<PathBuf>,
    /// Directory with the built page, served at `/`.
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = ProgramArgs::parse();
    info!("starting events api: {args:?}");

    let communities = match &args.communities {
        Some(path) => load_communities(path)?,
        None => default_communities(),
    };
    let cache = Arc::new(EventCache::new(
        http_client(Duration::from_secs(args.fetch_timeout_secs))?,
        Sources::default(),
        communities,
        Duration::from_secs(args.refresh_minutes * 60),
    ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    let mut app = Router::new()
        .route("/api/", get(handler::events::list))
        .layer(cors)
        .layer(Extension(cache));
    if let Some(dir) = &args.static_dir {
        let pages = Router::new()
            .fallback_service(ServeDir::new(dir))
            .layer(WebCache);
        app = app.fallback_service(pages);
    }

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    info!("listening on {}", args.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
