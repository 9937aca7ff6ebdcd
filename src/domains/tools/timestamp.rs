//! ISO-8601 timestamp coercion.
//!
//! The Vercel API expects time filters as milliseconds since the Unix epoch,
//! while tools accept human-friendly ISO-8601 strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::error::ToolError;

/// Convert an ISO-8601 timestamp into epoch milliseconds.
///
/// Accepted forms: RFC 3339 (`2025-01-01T00:00:00Z`, `2025-01-01T02:00:00+02:00`),
/// a date-time without offset (read as UTC), or a bare date (UTC midnight).
pub fn to_epoch_millis(field: &str, value: &str) -> Result<i64, ToolError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.timestamp_millis());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc().timestamp_millis());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().timestamp_millis());
        }
    }

    Err(ToolError::invalid_field(
        field,
        format!(
            "'{}' is not an ISO 8601 timestamp (e.g. \"2025-01-01T00:00:00Z\" or \"2025-01-01\")",
            value
        ),
    ))
}

/// Convert an optional ISO-8601 timestamp, passing `None` through.
pub fn opt_epoch_millis(field: &str, value: Option<&str>) -> Result<Option<i64>, ToolError> {
    value.map(|v| to_epoch_millis(field, v)).transpose()
}
