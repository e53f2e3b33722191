use crate::error::FetchError;
use async_trait::async_trait;

/// Retrieves the raw search results page for a target URL.
/// Implementations are picked once at startup and shared by every request.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the body of `url`; a single attempt, no retries
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;

    /// Whether requests go through the scrape service
    fn uses_proxy(&self) -> bool;
}
