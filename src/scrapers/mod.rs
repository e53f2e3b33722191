pub mod direct;
pub mod proxied;
pub mod rooms;
pub mod traits;

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, REFERER};
use tracing::info;

use crate::config::Config;
use crate::error::FetchError;

pub use direct::DirectFetcher;
pub use proxied::ProxiedFetcher;
pub use rooms::parse_rooms;
pub use traits::Fetcher;

/// Characters of an error body kept for diagnostics
pub const BODY_SNIPPET_CHARS: usize = 500;

/// Pick the fetch strategy: the scrape service when a key is configured, otherwise direct
pub fn fetcher_from_config(config: &Config) -> Result<Arc<dyn Fetcher>, FetchError> {
    match &config.scraper_api_key {
        Some(key) => {
            info!("Fetching through scrape service at {}", config.scraper_endpoint);
            Ok(Arc::new(ProxiedFetcher::new(config, key.clone())?))
        }
        None => {
            info!("No scrape service key configured, fetching directly");
            Ok(Arc::new(DirectFetcher::new(config)?))
        }
    }
}

/// Headers the booking site's own search page sends
pub(crate) fn browser_headers(config: &Config) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&config.accept_language)?);
    headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
    headers.insert(REFERER, HeaderValue::from_str(&config.landing_url)?);
    Ok(headers)
}

pub(crate) fn classify(err: reqwest::Error, timeout_secs: u64) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(timeout_secs)
    } else {
        FetchError::Transport(err)
    }
}
