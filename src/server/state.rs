use std::sync::Arc;

use crate::config::Config;
use crate::scrapers::Fetcher;

/// Read-only state shared by all requests
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Fetch strategy chosen at startup
    pub fetcher: Arc<dyn Fetcher>,
}

impl AppState {
    pub fn new(config: Config, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }
}
