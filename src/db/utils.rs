//! Database utility functions.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Canonical storage format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted calendar date spellings, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Accepted timestamp spellings; only the date part is kept.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse a calendar date from client input.
///
/// Month and day may omit their leading zero (`2021-1-5`).
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
    {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|timestamp| timestamp.date())
}

/// Normalize a due date to `yyyy-MM-dd`.
///
/// Empty input stays empty. Returns `None` when the input is not a date.
pub fn normalize_due_date(input: &str) -> Option<String> {
    if input.is_empty() {
        return Some(String::new());
    }
    parse_calendar_date(input).map(|date| date.format(DUE_DATE_FORMAT).to_string())
}
