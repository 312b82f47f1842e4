//! Time helpers.
//!
//! Timestamps travel through the system as Unix milliseconds; an explicit
//! [`FixedOffset`] decides what "local" means when rendering them or when
//! cutting them into calendar days.

use chrono::{DateTime, FixedOffset, Local, Offset, SecondsFormat, Utc};

/// Current Unix timestamp (milliseconds).
pub fn current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Offset of the host's local timezone at this moment.
pub fn local_offset() -> FixedOffset {
    Local::now().offset().fix()
}

/// Build an offset from minutes east of UTC.
///
/// Returns `None` when the value is outside +-24h.
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
}

/// Convert a Unix timestamp (milliseconds) to an RFC 3339 string in `offset`.
pub fn timestamp_to_rfc3339(millis: i64, offset: &FixedOffset) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(offset).to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Parse an RFC 3339 string into a Unix timestamp (milliseconds).
pub fn rfc3339_to_timestamp(value: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.timestamp_millis())
}
