//! Availability relay for the Binniguenda Huatulco booking site.
//!
//! Queries the hotel's AJAX search endpoint (directly or through ScrapingBee),
//! extracts bookable rooms from the returned HTML and re-serves them as a
//! message envelope for a chat agent.

pub mod config;
pub mod error;
pub mod format;
pub mod logger;
pub mod models;
pub mod scrapers;
pub mod search;
pub mod server;

pub use config::Config;
pub use error::{FetchError, ParameterError};
pub use models::{Envelope, Price, RoomOffer, SearchParams};
pub use scrapers::{DirectFetcher, Fetcher, ProxiedFetcher};
pub use server::{router, AppState};
