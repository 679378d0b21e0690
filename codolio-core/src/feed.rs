//! Contest feed download and decoding.
//!
//! The feed is a JSON object whose `data` key holds the list of contest
//! records. Anything else is a fatal error for the run.

use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::constants::FEED_DATA_KEY;
use crate::contest::ContestRecord;
use crate::error::{CodolioError, CodolioResult};

/// Fetch the feed with a single GET request.
pub async fn fetch_contests(
    client: &reqwest::Client,
    endpoint: &str,
) -> CodolioResult<Vec<ContestRecord>> {
    info!(endpoint, "fetching contest feed");

    let response = client
        .get(endpoint)
        .send()
        .await
        .map_err(|e| CodolioError::Fetch(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CodolioError::Fetch(format!(
            "{endpoint} returned HTTP {status}"
        )));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| CodolioError::Fetch(e.to_string()))?;

    parse_feed(&body)
}

/// Read a previously saved feed document from disk.
pub fn read_contests(path: &Path) -> CodolioResult<Vec<ContestRecord>> {
    info!(path = %path.display(), "reading contest feed");
    let body = std::fs::read(path)?;
    parse_feed(&body)
}

/// Decode a feed body and extract its contest records.
pub fn parse_feed(body: &[u8]) -> CodolioResult<Vec<ContestRecord>> {
    let document: Value =
        serde_json::from_slice(body).map_err(|e| CodolioError::Decode(e.to_string()))?;

    let Value::Object(mut root) = document else {
        return Err(CodolioError::Schema(
            "expected a JSON object at the top level".into(),
        ));
    };

    let entries = match root.remove(FEED_DATA_KEY) {
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(CodolioError::Schema(format!(
                "'{FEED_DATA_KEY}' is not a list"
            )));
        }
        None => {
            return Err(CodolioError::Schema(format!(
                "missing '{FEED_DATA_KEY}' key"
            )));
        }
    };

    let total = entries.len();
    let records: Vec<ContestRecord> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            if !entry.is_object() {
                warn!(index, "ignoring non-object entry in contest feed");
                return None;
            }
            serde_json::from_value(entry)
                .map_err(|e| warn!(index, error = %e, "ignoring unreadable contest entry"))
                .ok()
        })
        .collect();

    info!(total, usable = records.len(), "decoded contest feed");
    Ok(records)
}
