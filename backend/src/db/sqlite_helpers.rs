//! SQLite helper utilities
//!
//! SQLite has no native timestamp or boolean types; timestamps are stored as
//! RFC 3339 strings and booleans as 0/1 integers.

use chrono::{DateTime, Duration, Utc};

/// Current time as an ISO 8601 string
#[inline]
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339()
}

/// Convert a chrono DateTime to ISO 8601 string
#[inline]
pub fn datetime_to_str(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// ISO 8601 string for `seconds` from now
#[inline]
pub fn expires_in(seconds: i64) -> String {
    datetime_to_str(Utc::now() + Duration::seconds(seconds))
}

/// Parse an ISO 8601 string written by [`now_iso8601`]
pub fn str_to_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Convert a bool to SQLite integer
#[inline]
pub fn bool_to_int(b: bool) -> i32 {
    if b { 1 } else { 0 }
}
