//! Time utilities

use chrono::{DateTime, SecondsFormat, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Format a datetime as ISO 8601 with millisecond precision, e.g.
/// `2024-01-15T12:00:00.000Z`
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
