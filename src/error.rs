use thiserror::Error;

/// Invalid or missing search parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("Parámetros requeridos: check_in y check_out (YYYY-MM-DD)")]
    MissingDates,

    #[error("La fecha de salida debe ser posterior a la fecha de entrada")]
    NonPositiveNights,
}

/// Failure to retrieve the search results page
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Scraper error {status}: {message}")]
    Scraper { status: u16, message: String },
}

impl FetchError {
    /// HTTP status carried by the failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } | FetchError::Scraper { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Body snippet carried by the failure, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            FetchError::Http { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Keep at most `max` characters of `text`
pub fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
