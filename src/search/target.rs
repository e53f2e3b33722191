use url::form_urlencoded;

use crate::config::Config;
use crate::models::{Allocation, SearchParams, ADULT_FILLER_AGE};

/// Guest age list: one filler age per adult, then the child ages verbatim
pub fn guest_ages(params: &SearchParams) -> Vec<u32> {
    std::iter::repeat(ADULT_FILLER_AGE)
        .take(params.adults as usize)
        .chain(params.child_ages.iter().copied())
        .collect()
}

/// The search endpoint always receives exactly one allocation
pub fn build_allocations(params: &SearchParams) -> Vec<Allocation> {
    vec![Allocation {
        ad: params.adults,
        ch: params.children,
        ages: guest_ages(params),
    }]
}

/// Upstream AJAX search URL for `params`; deterministic for equal inputs
pub fn build_target_url(config: &Config, params: &SearchParams) -> String {
    // Serializing plain integers cannot fail.
    let allocations = serde_json::to_string(&build_allocations(params)).unwrap_or_default();

    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("destination_id", "")
        .append_pair("hotel_codes", &config.hotel_code)
        .append_pair("date_from", &params.check_in)
        .append_pair("date_to", &params.check_out)
        .append_pair("allocations", &allocations)
        .append_pair("sorting", "PRICE_ASC")
        .append_pair("reset", "false")
        .append_pair("force_room", "")
        .append_pair("promo_code", "")
        .append_pair("get_standard_rates", "1")
        .finish();

    format!("{}?{}", config.search_url, query)
}

/// Link a guest can open to continue the booking on the hotel site
pub fn build_booking_link(config: &Config, params: &SearchParams) -> String {
    let ages = guest_ages(params)
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "{}?date_from={}&date_to={}&ad={}&ch={}&ages={}",
        config.booking_link_url, params.check_in, params.check_out, params.adults, params.children, ages
    )
}
