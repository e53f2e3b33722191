use crate::config::Config;
use crate::error::{truncate, FetchError};
use crate::scrapers::traits::Fetcher;
use crate::scrapers::{browser_headers, classify, BODY_SNIPPET_CHARS};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

const SERVICE_MESSAGE_CHARS: usize = 300;

/// Relays requests through the ScrapingBee API
pub struct ProxiedFetcher {
    client: Client,
    endpoint: String,
    api_key: String,
    timeout_secs: u64,
}

impl ProxiedFetcher {
    pub fn new(config: &Config, api_key: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(browser_headers(config)?)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            endpoint: config.scraper_endpoint.clone(),
            api_key: api_key.into(),
            timeout_secs: config.timeout.as_secs(),
        })
    }
}

#[async_trait]
impl Fetcher for ProxiedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching URL through scrape service: {}", url);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("url", url),
                ("render_js", "false"),
                ("premium_proxy", "true"),
                ("forward_headers", "true"),
            ])
            .send()
            .await
            .map_err(|e| classify(e, self.timeout_secs))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify(e, self.timeout_secs))?;

        // The service may report failures inside a 200 response.
        if let Some(err) = service_error(&body) {
            warn!("Scrape service reported an error: {}", err);
            return Err(err);
        }

        if !status.is_success() {
            warn!("Scrape service returned status: {}", status);
            return Err(FetchError::Http {
                status: status.as_u16(),
                body: truncate(&body, BODY_SNIPPET_CHARS),
            });
        }

        debug!("Downloaded {} bytes of HTML", body.len());
        Ok(body)
    }

    fn uses_proxy(&self) -> bool {
        true
    }
}

/// A JSON body carrying a `status` or `error` field is a service error
fn service_error(body: &str) -> Option<FetchError> {
    let payload: Value = serde_json::from_str(body.trim()).ok()?;
    let fields = payload.as_object()?;

    let status = fields.get("status").filter(|v| is_truthy(v));
    let error = fields.get("error").filter(|v| is_truthy(v));
    if status.is_none() && error.is_none() {
        return None;
    }

    let status = status.and_then(status_code).unwrap_or(500);
    let message = error
        .or_else(|| fields.get("message").filter(|v| is_truthy(v)))
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| truncate(&payload.to_string(), SERVICE_MESSAGE_CHARS));

    Some(FetchError::Scraper { status, message })
}

fn status_code(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
