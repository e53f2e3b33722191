use crate::config::Config;
use crate::error::{truncate, FetchError};
use crate::scrapers::traits::Fetcher;
use crate::scrapers::{browser_headers, classify, BODY_SNIPPET_CHARS};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

/// Requests the booking site directly, posing as the site's own AJAX call
pub struct DirectFetcher {
    client: Client,
    timeout_secs: u64,
}

impl DirectFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(browser_headers(config)?)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            timeout_secs: config.timeout.as_secs(),
        })
    }
}

#[async_trait]
impl Fetcher for DirectFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(e, self.timeout_secs))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify(e, self.timeout_secs))?;

        if !status.is_success() {
            warn!("Booking site returned status: {}", status);
            return Err(FetchError::Http {
                status: status.as_u16(),
                body: truncate(&body, BODY_SNIPPET_CHARS),
            });
        }

        debug!("Downloaded {} bytes of HTML", body.len());
        Ok(body)
    }

    fn uses_proxy(&self) -> bool {
        false
    }
}
