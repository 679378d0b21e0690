//! ICS calendar generation.
//!
//! This module turns normalized contests into RFC 5545 calendar documents.

mod generate;

pub use generate::{CalendarDocument, DocumentOptions, build_calendar, format_ics_duration};
