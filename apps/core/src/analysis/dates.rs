//! Date Header Handling.
//!
//! Parses RFC-2822 `Date` headers and formats a project's activity period as
//! `DD/MM/YYYY` or `DD/MM/YYYY - DD/MM/YYYY`. Timestamps are normalised to UTC
//! so the same input always yields the same period.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::error::DateParseError;

const PERIOD_FORMAT: &str = "%d/%m/%Y";

/// Parses a raw `Date` header.
///
/// A trailing comment such as `(UTC)` or `(CEST)` is dropped before parsing.
/// Headers without a zone offset are rejected.
pub fn parse_email_date(raw: &str) -> Result<DateTime<Utc>, DateParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DateParseError::Empty);
    }

    let without_comment = match trimmed.find(" (") {
        Some(idx) => &trimmed[..idx],
        None => trimmed,
    };

    DateTime::parse_from_rfc2822(without_comment)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DateParseError::Malformed {
            value: trimmed.to_string(),
            reason: e.to_string(),
        })
}

/// Activity period of the given raw dates.
///
/// Missing or unparsable dates are skipped. Returns an empty string when no
/// date could be parsed.
pub fn format_period(dates: &[Option<String>]) -> String {
    let mut parsed: Vec<DateTime<Utc>> = Vec::new();

    for raw in dates.iter().flatten() {
        match parse_email_date(raw) {
            Ok(dt) => parsed.push(dt),
            Err(DateParseError::Empty) => {}
            Err(e) => warn!("Skipping date header: {}", e),
        }
    }

    let (Some(min), Some(max)) = (parsed.iter().min(), parsed.iter().max()) else {
        return String::new();
    };

    let start = min.format(PERIOD_FORMAT).to_string();
    let end = max.format(PERIOD_FORMAT).to_string();
    if start == end {
        start
    } else {
        format!("{} - {}", start, end)
    }
}
