//! ICS file generation.

use std::time::Duration;

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, Property, ValueType};

use crate::constants::DEFAULT_PROD_ID;
use crate::contest::NormalizedContest;

const ICS_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Document-level settings shared by every calendar of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOptions {
    pub prod_id: String,
    /// Suggested polling interval for subscribed clients.
    pub refresh_interval: Option<Duration>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        DocumentOptions {
            prod_id: DEFAULT_PROD_ID.to_string(),
            refresh_interval: None,
        }
    }
}

/// A named, ordered set of contests that becomes one .ics file.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDocument {
    pub name: String,
    pub events: Vec<NormalizedContest>,
}

impl CalendarDocument {
    pub fn new(name: impl Into<String>, events: Vec<NormalizedContest>) -> Self {
        CalendarDocument {
            name: name.into(),
            events,
        }
    }

    pub fn to_ics(&self, options: &DocumentOptions) -> Vec<u8> {
        build_calendar(&self.name, &self.events, options)
    }
}

/// Serialize contests into a calendar document.
///
/// Events are written in the order given. DTSTAMP and the calendar's
/// LAST-MODIFIED are the build time.
pub fn build_calendar(
    name: &str,
    events: &[NormalizedContest],
    options: &DocumentOptions,
) -> Vec<u8> {
    let generated_at = Utc::now();
    let mut cal = Calendar::new();
    cal.append_property(Property::new("NAME", name));
    cal.append_property(Property::new("X-WR-CALNAME", name));
    cal.append_property(Property::new("X-WR-TIMEZONE", "UTC"));
    cal.append_property(Property::new(
        "LAST-MODIFIED",
        generated_at.format(ICS_UTC_FORMAT).to_string(),
    ));

    if let Some(interval) = options.refresh_interval {
        let duration = format_ics_duration(interval);
        let mut refresh = Property::new("REFRESH-INTERVAL", &duration);
        refresh.append_parameter(ValueType::Duration);
        cal.append_property(refresh);
        cal.append_property(Property::new("X-PUBLISHED-TTL", &duration));
    }

    for contest in events {
        cal.push(contest_event(contest, generated_at));
    }

    let cal = cal.done();

    // Post-process to swap in our PRODID and drop the default CALSCALE
    finalize_ics(&cal.to_string(), &options.prod_id).into_bytes()
}

fn contest_event(contest: &NormalizedContest, dtstamp: DateTime<Utc>) -> icalendar::Event {
    let mut event = icalendar::Event::new();
    event.uid(&contest.uid);
    event.add_property("DTSTAMP", dtstamp.format(ICS_UTC_FORMAT).to_string());
    event.summary(&contest.name);
    event.add_property("DTSTART", contest.start.format(ICS_UTC_FORMAT).to_string());
    event.add_property("DTEND", contest.end.format(ICS_UTC_FORMAT).to_string());
    event.description(&contest.url);

    // The "No link available" fallback is not a URI
    if url::Url::parse(&contest.url).is_ok() {
        event.add_property("URL", &contest.url);
    }

    if !contest.platform.is_empty() {
        event.add_property("CATEGORIES", &contest.platform);
    }

    event.done()
}

/// Clean up ICS output from the icalendar crate
/// - Replace the crate's PRODID with ours
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn finalize_ics(ics: &str, prod_id: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(prod_id);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Format a duration the way RFC 5545 DURATION values are written
/// (e.g. `P1D`, `PT12H`, `PT1H30M`).
pub fn format_ics_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    let mut out = String::from("P");
    if days > 0 {
        out.push_str(&format!("{days}D"));
    }
    if hours > 0 || minutes > 0 || seconds > 0 || days == 0 {
        out.push('T');
        if hours > 0 {
            out.push_str(&format!("{hours}H"));
        }
        if minutes > 0 {
            out.push_str(&format!("{minutes}M"));
        }
        if seconds > 0 || (hours == 0 && minutes == 0) {
            out.push_str(&format!("{seconds}S"));
        }
    }
    out
}
