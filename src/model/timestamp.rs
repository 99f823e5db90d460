//! Timestamp text format
//!
//! Timestamps are naive local time with microsecond precision, persisted as
//! `YYYY-MM-DDTHH:MM:SS.ffffff` (always six fractional digits).

use chrono::{Local, NaiveDateTime, SubsecRound};

use super::errors::{ModelError, ModelResult};

/// chrono format string for persisted timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Current local time, truncated to microseconds so it survives a
/// format/parse cycle unchanged.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

pub fn format(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a persisted timestamp for `field`.
///
/// chrono accepts a missing or shorter fraction for `%.6f`, so the six
/// fractional digits are checked first.
pub fn parse(field: &str, text: &str) -> ModelResult<NaiveDateTime> {
    let malformed = || ModelError::MalformedTimestamp {
        field: field.to_string(),
        value: text.to_string(),
    };

    let (_, fraction) = text.rsplit_once('.').ok_or_else(malformed)?;
    if fraction.len() != 6 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|_| malformed())
}
