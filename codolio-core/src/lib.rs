//! Core library for codolio-ics.
//!
//! This crate turns the Codolio upcoming-contests feed into ICS calendars:
//! - `feed` downloads and decodes the feed
//! - `date`, `contest` and `process` normalize, filter and order records
//! - `ics` serializes a calendar document
//! - `pipeline` plans and writes one file per scope

pub mod config;
pub mod constants;
pub mod contest;
pub mod date;
pub mod error;
pub mod feed;
pub mod ics;
pub mod pipeline;
pub mod process;

pub use config::{CodolioConfig, OutputMode};
pub use contest::{ContestRecord, NormalizedContest};
pub use error::{CodolioError, CodolioResult};
