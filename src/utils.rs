// src/utils.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Return the trimmed value when it carries any text
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Case-insensitive substring test; `needle_lower` must already be lower-cased
pub fn contains_lowercase(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Same as [`contains_lowercase`] for optional fields; a missing field never matches
pub fn field_contains(field: Option<&str>, needle_lower: &str) -> bool {
    field.is_some_and(|value| contains_lowercase(value, needle_lower))
}

/// Parse the calendar date out of the date formats the backend hands out.
///
/// Accepts plain `YYYY-MM-DD`, RFC 3339 timestamps, naive ISO timestamps
/// (`2024-05-01T10:30:00.123456`) and RFC 2822 email dates. Time and offset
/// are discarded: only the date as written is kept.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts.date());
        }
    }

    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|ts| ts.date_naive())
}

/// Join a base URL and an endpoint path without doubling slashes
pub fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
