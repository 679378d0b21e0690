//! From decoded records to files on disk.
//!
//! Planning builds every document in memory; writing only starts once all of
//! them exist, so a failed run never leaves a partial set behind.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::CodolioConfig;
use crate::constants::{FILE_SUFFIX, GLOBAL_FILE_STEM};
use crate::contest::ContestRecord;
use crate::error::CodolioResult;
use crate::ics::{DocumentOptions, build_calendar};
use crate::process::process_with_stats;

/// The set of contests a document covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Global,
    Platform(String),
}

impl Scope {
    pub fn file_name(&self) -> String {
        match self {
            Scope::Global => format!("{GLOBAL_FILE_STEM}{FILE_SUFFIX}"),
            Scope::Platform(platform) => format!("{platform}{FILE_SUFFIX}"),
        }
    }

    fn filter(&self) -> Option<&str> {
        match self {
            Scope::Global => None,
            Scope::Platform(platform) => Some(platform.as_str()),
        }
    }
}

/// A fully rendered calendar waiting to be written.
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub scope: Scope,
    pub file_name: String,
    pub calendar_name: String,
    pub event_count: usize,
    /// Matching records dropped for invalid dates.
    pub skipped: usize,
    pub contents: Vec<u8>,
}

/// Human-readable name for known platform identifiers.
pub fn platform_display_name(platform: &str) -> String {
    match platform {
        "leetcode" => "LeetCode".to_string(),
        "atcoder" => "AtCoder".to_string(),
        "codeforces" => "Codeforces".to_string(),
        "codechef" => "CodeChef".to_string(),
        "geeksforgeeks" => "GeeksforGeeks".to_string(),
        other => other.to_string(),
    }
}

/// Scopes to build for this configuration: the global document first, then
/// each distinct platform in configured order.
pub fn scopes(config: &CodolioConfig) -> Vec<Scope> {
    let mut scopes = Vec::new();

    if config.mode.includes_global() {
        scopes.push(Scope::Global);
    }

    if config.mode.includes_platforms() {
        for platform in &config.platforms {
            let id = platform.trim().to_lowercase();
            if id.is_empty() {
                continue;
            }
            let scope = Scope::Platform(id);
            if !scopes.contains(&scope) {
                scopes.push(scope);
            }
        }
    }

    scopes
}

/// Build every document the configuration asks for.
pub fn plan(config: &CodolioConfig, records: &[ContestRecord]) -> CodolioResult<Vec<OutputFile>> {
    let options = config.document_options()?;

    Ok(scopes(config)
        .into_iter()
        .map(|scope| {
            let calendar_name = match &scope {
                Scope::Global => config.global_calendar_name.clone(),
                Scope::Platform(platform) => {
                    format!("{} Contests", platform_display_name(platform))
                }
            };
            render_scope(scope, calendar_name, records, &options)
        })
        .collect())
}

fn render_scope(
    scope: Scope,
    calendar_name: String,
    records: &[ContestRecord],
    options: &DocumentOptions,
) -> OutputFile {
    let processed = process_with_stats(records, scope.filter());
    let contents = build_calendar(&calendar_name, &processed.contests, options);

    OutputFile {
        file_name: scope.file_name(),
        scope,
        calendar_name,
        event_count: processed.contests.len(),
        skipped: processed.skipped,
        contents,
    }
}

/// Write planned files into `dir`, creating it if needed and replacing any
/// previous files of the same name.
pub fn write_outputs(dir: &Path, files: &[OutputFile]) -> CodolioResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(&file.file_name);
        std::fs::write(&path, &file.contents)?;
        info!(path = %path.display(), events = file.event_count, "wrote calendar");
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputMode;
    use serde_json::json;

    fn records() -> Vec<ContestRecord> {
        serde_json::from_value(json!([
            {
                "platform": "codeforces",
                "contestName": "Codeforces Round 1000",
                "contestStartDate": "2025-03-20T14:35:00.000Z",
                "contestEndDate": "2025-03-20T16:35:00.000Z",
                "contestUrl": "https://codeforces.com/contests/2063",
                "_id": "cf-1",
                "contestCode": "2063"
            },
            {
                "platform": "leetcode",
                "contestName": "Weekly Contest 441",
                "contestStartDate": "2025-03-23T02:30:00.000Z",
                "contestEndDate": null,
                "_id": "lc-1"
            }
        ]))
        .unwrap()
    }

    fn config(mode: OutputMode, platforms: &[&str]) -> CodolioConfig {
        CodolioConfig {
            mode,
            platforms: platforms.iter().map(|p| p.to_string()).collect(),
            ..CodolioConfig::default()
        }
    }

    fn text(file: &OutputFile) -> &str {
        std::str::from_utf8(&file.contents).unwrap()
    }

    #[test]
    fn test_scopes_per_mode() {
        let platforms = ["leetcode", "codeforces"];
        assert_eq!(scopes(&config(OutputMode::Global, &platforms)), vec![Scope::Global]);
        assert_eq!(
            scopes(&config(OutputMode::PerPlatform, &platforms)),
            vec![
                Scope::Platform("leetcode".into()),
                Scope::Platform("codeforces".into())
            ]
        );
        assert_eq!(scopes(&config(OutputMode::Both, &platforms)).len(), 3);
        assert_eq!(scopes(&config(OutputMode::Both, &platforms))[0], Scope::Global);
    }

    #[test]
    fn test_scopes_normalize_and_dedupe_platforms() {
        let cfg = config(OutputMode::PerPlatform, &[" CodeForces ", "codeforces", "", "atcoder"]);
        assert_eq!(
            scopes(&cfg),
            vec![
                Scope::Platform("codeforces".into()),
                Scope::Platform("atcoder".into())
            ]
        );
    }

    #[test]
    fn test_file_names() {
        assert_eq!(Scope::Global.file_name(), "codolio_contests.ics");
        assert_eq!(
            Scope::Platform("geeksforgeeks".into()).file_name(),
            "geeksforgeeks_contests.ics"
        );
    }

    #[test]
    fn test_single_codeforces_record() {
        let files = plan(&config(OutputMode::PerPlatform, &["leetcode", "codeforces"]), &records())
            .unwrap();
        assert_eq!(files.len(), 2);

        let leetcode = &files[0];
        assert_eq!(leetcode.file_name, "leetcode_contests.ics");
        assert_eq!(leetcode.event_count, 0);
        assert_eq!(leetcode.skipped, 1);
        assert!(!text(leetcode).contains("BEGIN:VEVENT"));
        assert!(text(leetcode).contains("X-WR-CALNAME:LeetCode Contests"));

        let codeforces = &files[1];
        assert_eq!(codeforces.file_name, "codeforces_contests.ics");
        assert_eq!(codeforces.event_count, 1);
        assert_eq!(text(codeforces).matches("BEGIN:VEVENT").count(), 1);
        assert!(text(codeforces).contains("SUMMARY:Codeforces Round 1000\r\n"));
        assert!(text(codeforces).contains(&format!("UID:{}\r\n", records()[0].uid())));
    }

    #[test]
    fn test_null_end_date_is_excluded_everywhere() {
        let files = plan(&config(OutputMode::Both, &["leetcode", "codeforces"]), &records())
            .unwrap();

        for file in &files {
            assert!(
                !text(file).contains("Weekly Contest 441"),
                "{} should not contain the dropped contest",
                file.file_name
            );
        }

        let global = files.iter().find(|f| f.scope == Scope::Global).unwrap();
        assert_eq!(global.event_count, 1);
        assert_eq!(global.skipped, 1);
        assert!(text(global).contains("X-WR-CALNAME:Codolio Contests"));
    }

    #[test]
    fn test_unknown_platform_uses_identifier_as_name() {
        let files = plan(&config(OutputMode::PerPlatform, &["hackerearth"]), &records()).unwrap();
        assert_eq!(files[0].calendar_name, "hackerearth Contests");
        assert_eq!(files[0].event_count, 0);
    }

    #[test]
    fn test_write_outputs_creates_dir_and_replaces_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("public");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("codolio_contests.ics"), "stale").unwrap();

        let files = plan(&config(OutputMode::Global, &[]), &records()).unwrap();
        let written = write_outputs(&out, &files).unwrap();

        assert_eq!(written, vec![out.join("codolio_contests.ics")]);
        let contents = std::fs::read_to_string(&written[0]).unwrap();
        assert!(contents.starts_with("BEGIN:VCALENDAR"));

        let nested = dir.path().join("a/b");
        write_outputs(&nested, &files).unwrap();
        assert!(nested.join("codolio_contests.ics").exists());
    }
}
