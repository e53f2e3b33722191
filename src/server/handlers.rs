//! HTTP endpoint handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    error::{truncate, FetchError, ParameterError},
    format::rooms_envelope,
    models::{Envelope, SearchParams},
    scrapers::parse_rooms,
    search::{build_booking_link, build_target_url, SearchQuery},
    server::state::AppState,
};

const PREVIEW_CHARS: usize = 600;
const DEBUG_CHECK_IN: &str = "2025-09-23";
const DEBUG_CHECK_OUT: &str = "2025-09-25";

const PROXY_HINT: &str = "Revisa SCRAPINGBEE_API_KEY y saldo/plan en ScrapingBee.";
const DIRECT_HINT: &str = "Sin API de scraper: el sitio puede devolver una respuesta vacía.";

/// Failure of an availability lookup; always rendered as a message envelope
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("{0}")]
    Parameter(#[from] ParameterError),

    #[error("Parámetros inválidos: {0}")]
    Query(String),

    #[error("No se pudo consultar la disponibilidad: {source}. {}", hint(.proxied))]
    Fetch {
        #[source]
        source: FetchError,
        proxied: bool,
    },
}

fn hint(proxied: &bool) -> &'static str {
    if *proxied {
        PROXY_HINT
    } else {
        DIRECT_HINT
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let code = match &self {
            RelayError::Parameter(_) | RelayError::Query(_) => StatusCode::BAD_REQUEST,
            RelayError::Fetch { .. } => StatusCode::BAD_GATEWAY,
        };
        (code, Json(Envelope::to_user(self.to_string()))).into_response()
    }
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "useScraper": state.fetcher.uses_proxy(),
        "endpoint": state.config.scraper_endpoint,
    }))
}

/// Look up availability and answer with the formatted room list
pub async fn consultar(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Envelope>, RelayError> {
    let Query(query) = query.map_err(|e| RelayError::Query(e.body_text()))?;
    let params = query.normalize();
    let nights = validate(&params)?;

    let target_url = build_target_url(&state.config, &params);
    let html = state
        .fetcher
        .fetch(&target_url)
        .await
        .map_err(|source| {
            warn!("Availability fetch failed: {}", source);
            RelayError::Fetch {
                source,
                proxied: state.fetcher.uses_proxy(),
            }
        })?;

    let rooms = parse_rooms(&html, nights);
    info!(
        "Found {} rooms for {} -> {} ({} nights)",
        rooms.len(),
        params.check_in,
        params.check_out,
        nights
    );

    Ok(Json(rooms_envelope(&rooms)))
}

/// Dates must be present and check-out strictly after check-in
fn validate(params: &SearchParams) -> Result<i64, ParameterError> {
    if params.check_in.is_empty() || params.check_out.is_empty() {
        return Err(ParameterError::MissingDates);
    }

    params
        .nights()
        .filter(|nights| *nights > 0)
        .ok_or(ParameterError::NonPositiveNights)
}

/// Diagnostic view of a raw search: mode, endpoint, room count and page preview
pub async fn debug(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let params = SearchParams {
        check_in: or_default_date(query.check_in.as_deref(), DEBUG_CHECK_IN),
        check_out: or_default_date(query.check_out.as_deref(), DEBUG_CHECK_OUT),
        child_ages: Vec::new(),
        ..query.normalize()
    };
    let nights = params.nights().unwrap_or(0);

    let target_url = build_target_url(&state.config, &params);
    let html = state.fetcher.fetch(&target_url).await.map_err(|e| {
        warn!("Debug fetch failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(debug_error(&e)))
    })?;
    let rooms = parse_rooms(&html, nights);

    Ok(Json(json!({
        "useScraper": state.fetcher.uses_proxy(),
        "endpoint": state.config.scraper_endpoint,
        "target_url": target_url,
        "link_busqueda": build_booking_link(&state.config, &params),
        "rooms_found": rooms.len(),
        "preview": truncate(&html, PREVIEW_CHARS),
    })))
}

/// Missing or empty dates fall back to the diagnostic defaults
fn or_default_date(raw: Option<&str>, default: &str) -> String {
    raw.filter(|date| !date.is_empty()).unwrap_or(default).to_string()
}

fn debug_error(err: &FetchError) -> Value {
    let mut body = json!({ "error": err.to_string() });
    if let Some(status) = err.status() {
        body["status"] = json!(status);
    }
    if let Some(snippet) = err.body() {
        body["body"] = json!(snippet);
    }
    body
}
