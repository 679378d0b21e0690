//! Contest timestamp normalization.
//!
//! The feed mixes `Z`-suffixed and offset-suffixed ISO-8601 timestamps. Both
//! are normalized to a UTC instant; anything else is treated as missing.

use chrono::{DateTime, FixedOffset, ParseError, Utc};
use serde_json::Value;
use tracing::debug;

/// Accepted layouts once a trailing `Z` has been rewritten to `+00:00`.
/// A date, a time and an offset are always required.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Parse a raw feed value into a UTC instant.
///
/// Only JSON strings are considered; absent, `null` and non-string values
/// return `None`. Parse failures are logged at debug level and also return
/// `None`.
pub fn parse_contest_date(raw: Option<&Value>) -> Option<DateTime<Utc>> {
    let Some(Value::String(s)) = raw else {
        if let Some(value) = raw.filter(|v| !v.is_null()) {
            debug!(raw = %value, "ignoring non-string contest date");
        }
        return None;
    };

    match parse_iso_datetime(s) {
        Ok(dt) => Some(dt),
        Err(e) => {
            debug!(raw = %s, error = %e, "failed to parse contest date");
            None
        }
    }
}

/// Parse an ISO-8601 date-time string with a mandatory offset into UTC.
///
/// A trailing `Z` is replaced by `+00:00` before parsing.
pub fn parse_iso_datetime(s: &str) -> Result<DateTime<Utc>, ParseError> {
    let normalized = match s.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => s.to_string(),
    };

    let mut last_err = match DateTime::parse_from_rfc3339(&normalized) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(e) => e,
    };

    for format in DATETIME_FORMATS {
        match DateTime::<FixedOffset>::parse_from_str(&normalized, format) {
            Ok(dt) => return Ok(dt.with_timezone(&Utc)),
            Err(e) => last_err = e,
        }
    }

    Err(last_err)
}
