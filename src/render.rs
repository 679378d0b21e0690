//! Terminal rendering for generated calendars.

use codolio_core::pipeline::{OutputFile, Scope};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Scope {
    fn render(&self) -> String {
        match self {
            Scope::Global => "🌐 all platforms".to_string(),
            Scope::Platform(platform) => format!("📅 {}", platform),
        }
    }
}

impl Render for OutputFile {
    fn render(&self) -> String {
        let count = format!("{} {}", self.event_count, pluralize("event", self.event_count));
        let mut line = format!(
            "{}  {}  {}",
            self.scope.render(),
            self.file_name.bold(),
            count.dimmed()
        );

        if self.skipped > 0 {
            let skipped = format!(
                "({} skipped, invalid {})",
                self.skipped,
                pluralize("date", self.skipped)
            );
            line.push_str(&format!("  {}", skipped.yellow()));
        }

        line
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
