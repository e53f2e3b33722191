pub mod params;
pub mod target;

pub use params::SearchQuery;
pub use target::{build_booking_link, build_target_url};
