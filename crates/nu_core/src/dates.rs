use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::{Error, Result};

pub const DATE_UNAVAILABLE: &str = "Date unavailable";

lazy_static! {
    static ref DD_MM_YYYY: Regex = Regex::new(r"^(\d{2})-(\d{2})-(\d{4})$").unwrap();
}

/// Path format of the by-date endpoints.
pub fn api_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Parses the `DD-MM-YYYY` form the CLI and the API share.
pub fn parse_api_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%d-%m-%Y")
        .map_err(|e| Error::InvalidDate(format!("{}: {}", s, e)))
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn checked_ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if year <= 1900 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Best-effort parse of the date strings the backend hands out.
pub fn parse_article_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();

    if let Some(caps) = DD_MM_YYYY.captures(s) {
        let day = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let year = caps[3].parse().ok()?;
        return checked_ymd(year, month, day);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        let date = dt.with_timezone(&Utc).date_naive();
        return (date.year() > 1900).then_some(date);
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            let date = dt.date();
            return (date.year() > 1900).then_some(date);
        }
    }

    if s.contains('T') || s.contains('Z') {
        return None;
    }

    let parts: Vec<&str> = s.split(|c| c == '-' || c == '/').collect();
    if parts.len() == 3 {
        let year = parts[0].trim().parse().ok()?;
        let month = parts[1].trim().parse().ok()?;
        let day = parts[2].trim().parse().ok()?;
        return checked_ymd(year, month, day);
    }

    None
}

/// Long British form, e.g. `5 March 2025`.
pub fn format_long(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Meta-line date. Unparsable input is shown as it came.
pub fn display_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return DATE_UNAVAILABLE.to_string();
    };
    match parse_article_date(raw) {
        Some(date) => format_long(date),
        None => {
            warn!("Could not parse date: {}", raw);
            raw.to_string()
        }
    }
}
