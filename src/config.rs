use std::time::Duration;

use tracing::warn;

pub const DEFAULT_PORT: u16 = 8000;

const LANDING_URL: &str = "https://binniguendahuatulco.bookinweb.es/es/booking/";
const SEARCH_URL: &str = "https://binniguendahuatulco.bookinweb.es/es/booking/ajax/search/";
const BOOKING_LINK_URL: &str = "https://binniguendahuatulco.bookinweb.es/es/booking/process/room";
const SCRAPER_ENDPOINT: &str = "https://app.scrapingbee.com/api/v1/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const ACCEPT_LANGUAGE: &str = "es-ES,es;q=0.9,en;q=0.8";

/// Process configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Scrape service key; `None` selects direct fetching
    pub scraper_api_key: Option<String>,
    pub port: u16,
    pub scraper_endpoint: String,
    pub landing_url: String,
    pub search_url: String,
    pub booking_link_url: String,
    pub hotel_code: String,
    pub user_agent: String,
    pub accept_language: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraper_api_key: None,
            port: DEFAULT_PORT,
            scraper_endpoint: SCRAPER_ENDPOINT.to_string(),
            landing_url: LANDING_URL.to_string(),
            search_url: SEARCH_URL.to_string(),
            booking_link_url: BOOKING_LINK_URL.to_string(),
            hotel_code: "HBH".to_string(),
            user_agent: USER_AGENT.to_string(),
            accept_language: ACCEPT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Build from `SCRAPINGBEE_API_KEY` and `PORT`
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("SCRAPINGBEE_API_KEY").ok(),
            std::env::var("PORT").ok(),
        )
    }

    fn from_vars(api_key: Option<String>, port: Option<String>) -> Self {
        let scraper_api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let port = match port {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("Ignoring invalid PORT value {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            scraper_api_key,
            port,
            ..Self::default()
        }
    }

    pub fn use_scraper(&self) -> bool {
        self.scraper_api_key.is_some()
    }
}
