use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;

use crate::models::SearchParams;

pub const DEFAULT_ADULTS: u32 = 2;
pub const DEFAULT_CHILDREN: u32 = 0;

/// Raw query string of `/consultar` and `/debug`
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SearchQuery {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub adultos: Option<String>,
    pub ninos: Option<String>,
    pub edades_ninos: Option<String>,
}

impl SearchQuery {
    /// Best-effort normalization; never fails
    pub fn normalize(&self) -> SearchParams {
        SearchParams {
            check_in: self.check_in.clone().unwrap_or_default(),
            check_out: self.check_out.clone().unwrap_or_default(),
            adults: parse_int_safe(self.adultos.as_deref(), DEFAULT_ADULTS),
            children: parse_int_safe(self.ninos.as_deref(), DEFAULT_CHILDREN),
            child_ages: parse_ages(self.edades_ninos.as_deref()),
        }
    }
}

impl SearchParams {
    /// Calendar nights between check-in and check-out, `None` if either date is malformed
    pub fn nights(&self) -> Option<i64> {
        nights_between(&self.check_in, &self.check_out)
    }
}

/// Keep only the digits of `raw` and parse them, falling back to `default`
pub fn parse_int_safe(raw: Option<&str>, default: u32) -> u32 {
    let digits: String = raw
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    digits.parse().unwrap_or(default)
}

/// Every run of digits in `raw`, in order
pub fn parse_ages(raw: Option<&str>) -> Vec<u32> {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let digits = DIGITS.get_or_init(|| Regex::new(r"\d+").expect("valid digit regex"));

    digits
        .find_iter(raw.unwrap_or_default())
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

pub fn nights_between(check_in: &str, check_out: &str) -> Option<i64> {
    let from = NaiveDate::parse_from_str(check_in.trim(), "%Y-%m-%d").ok()?;
    let to = NaiveDate::parse_from_str(check_out.trim(), "%Y-%m-%d").ok()?;
    Some((to - from).num_days())
}
