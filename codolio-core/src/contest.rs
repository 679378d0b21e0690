//! Contest records as they arrive from the feed, and their normalized form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha1::{Digest, Sha1};

use crate::constants::{UID_DOMAIN, UID_SEPARATOR};

/// A contest entry from the feed's `data` list.
///
/// Fields are kept as raw JSON values: the feed gives no type guarantees, and
/// a wrongly typed field should degrade to "absent" rather than reject the
/// whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestRecord {
    #[serde(default)]
    pub platform: Option<Value>,
    #[serde(default)]
    pub contest_name: Option<Value>,
    #[serde(default)]
    pub contest_start_date: Option<Value>,
    #[serde(default)]
    pub contest_end_date: Option<Value>,
    #[serde(default)]
    pub contest_url: Option<Value>,
    #[serde(default, rename = "_id")]
    pub id: Option<Value>,
    #[serde(default)]
    pub contest_code: Option<Value>,
}

impl ContestRecord {
    /// The platform as a string, if the feed provided one.
    pub fn platform_str(&self) -> Option<&str> {
        as_str(self.platform.as_ref())
    }

    /// True when the record's platform equals `filter`, ignoring case and
    /// surrounding whitespace.
    pub fn matches_platform(&self, filter: &str) -> bool {
        self.platform_str()
            .is_some_and(|p| p.trim().eq_ignore_ascii_case(filter.trim()))
    }

    /// Stable calendar UID for this record.
    ///
    /// Derived from the raw platform, `_id`, `contestCode`, start date and
    /// name, so the same record keeps its UID across runs and across the
    /// global and per-platform documents.
    pub fn uid(&self) -> String {
        contest_uid(
            &uid_part(self.platform.as_ref()),
            &uid_part(self.id.as_ref()),
            &uid_part(self.contest_code.as_ref()),
            &uid_part(self.contest_start_date.as_ref()),
            &uid_part(self.contest_name.as_ref()),
        )
    }
}

/// Build a UID from its five inputs: SHA-1 of the joined parts, lowercase hex,
/// with the `@codolio.com` suffix.
pub fn contest_uid(
    platform: &str,
    id: &str,
    contest_code: &str,
    start_date: &str,
    name: &str,
) -> String {
    let joined = [platform, id, contest_code, start_date, name].join(UID_SEPARATOR);
    let digest = Sha1::digest(joined.as_bytes());
    format!("{}@{}", hex::encode(digest), UID_DOMAIN)
}

/// A contest ready to be written to a calendar.
///
/// Only built from records whose start and end both parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedContest {
    pub platform: String,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub url: String,
    pub uid: String,
}

pub(crate) fn as_str(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

/// Non-empty string field, or `None`.
pub(crate) fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    as_str(value).filter(|s| !s.is_empty())
}

/// Render a UID input: strings verbatim, numbers and other scalars as their
/// JSON text, absent or `null` as the empty string.
fn uid_part(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
