//! # Date Handling Utilities
//!
//! Formatting of the upstream's date strings (`2016-03-25`,
//! `2016-03-25 00:00:00`, or RFC 3339) for display.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses the date formats the upstream emits.
pub fn parse_upstream_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|datetime| datetime.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|datetime| datetime.date_naive()))
}

/// Formats a date in the short US style used on cover cards.
///
/// Returns `None` when the input is not a recognizable date.
///
/// # Example
/// ```rust
/// use comicvine_util::date_handling::format_cover_date;
///
/// assert_eq!(format_cover_date("1939-05-01").as_deref(), Some("May 1, 1939"));
/// assert_eq!(format_cover_date("2016-03-25 00:00:00").as_deref(), Some("Mar 25, 2016"));
/// assert_eq!(format_cover_date("soon"), None);
/// ```
pub fn format_cover_date(value: &str) -> Option<String> {
    parse_upstream_date(value).map(|date| date.format("%b %-d, %Y").to_string())
}
