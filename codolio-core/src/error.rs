//! Error types for codolio-ics.

use thiserror::Error;

/// Errors that abort a run.
///
/// Per-record problems (unparseable dates, missing names) are not errors:
/// the record is dropped or defaulted and processing continues.
#[derive(Error, Debug)]
pub enum CodolioError {
    #[error("Failed to fetch contest feed: {0}")]
    Fetch(String),

    #[error("Contest feed is not valid JSON: {0}")]
    Decode(String),

    #[error("Unexpected contest feed shape: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for codolio operations.
pub type CodolioResult<T> = Result<T, CodolioError>;
