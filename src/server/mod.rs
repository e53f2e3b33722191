//! HTTP surface: `/health`, `/consultar` and `/debug`.

mod handlers;
pub mod state;

use std::net::SocketAddr;

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::scrapers::fetcher_from_config;

pub use handlers::RelayError;
pub use state::AppState;

pub const HEALTH_PATH: &str = "/health";
pub const SEARCH_PATH: &str = "/consultar";
pub const DEBUG_PATH: &str = "/debug";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(handlers::health))
        .route(SEARCH_PATH, get(handlers::consultar))
        .route(DEBUG_PATH, get(handlers::debug))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn run(config: Config) -> anyhow::Result<()> {
    let fetcher = fetcher_from_config(&config).context("Failed to set up fetcher")?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let use_scraper = fetcher.uses_proxy();

    let app = router(AppState::new(config, fetcher));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server on http://{} (useScraper={})", addr, use_scraper);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("HTTP server failed")?;

    Ok(())
}
