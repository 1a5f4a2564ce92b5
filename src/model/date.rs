//! Timestamp helpers.
//!
//! Records keep timestamps in the upstream string form. Range filters and the
//! on-screen sort compare that text lexically; only the report grouper and the
//! display formatting need a parsed value.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Display format for dates in tables and exported documents.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Placeholder used wherever a value is absent in rendered output.
pub const MISSING_VALUE: &str = "-";

/// Calendar-date prefix (`YYYY-MM-DD`) of a stored timestamp.
///
/// Values shorter than ten bytes, or without a char boundary there, are
/// returned whole so comparisons stay lexical.
#[must_use]
pub fn date_prefix(raw: &str) -> &str {
    raw.get(..10).unwrap_or(raw)
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339, Postgres-style `YYYY-MM-DD HH:MM:SS+TZ`, naive
/// date-times and bare dates. Offsets are dropped: the wall-clock value as
/// stored is what gets displayed. Ordering uses [`parse_instant`].
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Parse a stored timestamp as a point in time.
///
/// Offset-bearing values are converted to UTC; values without an offset are
/// taken as UTC.
#[must_use]
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    parse_timestamp(raw).map(|dt| dt.and_utc())
}

/// Parse a user-supplied range bound (`YYYY-MM-DD`).
pub fn parse_date_bound(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
}

/// Render a stored timestamp for display (`dd/mm/yyyy`).
///
/// Absent values render as [`MISSING_VALUE`]; unparseable text is shown as-is.
#[must_use]
pub fn format_display_date(raw: Option<&str>) -> String {
    match raw {
        None => MISSING_VALUE.to_string(),
        Some(s) => parse_timestamp(s)
            .map_or_else(|| s.to_string(), |dt| dt.format(DISPLAY_DATE_FORMAT).to_string()),
    }
}
