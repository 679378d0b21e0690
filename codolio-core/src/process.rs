//! Per-platform filtering, normalization and ordering of contest records.

use tracing::debug;

use crate::constants::{NO_LINK, UNNAMED_CONTEST};
use crate::contest::{ContestRecord, NormalizedContest, as_str, non_empty_str};
use crate::date::parse_contest_date;

/// Outcome of processing one scope (a platform, or everything).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Processed {
    /// Normalized contests in ascending start order.
    pub contests: Vec<NormalizedContest>,
    /// Records that matched the scope but were dropped for a missing or
    /// unparseable start/end date.
    pub skipped: usize,
}

/// Normalize the records matching `platform_filter` (all records when `None`)
/// and sort them by start time.
pub fn process(records: &[ContestRecord], platform_filter: Option<&str>) -> Vec<NormalizedContest> {
    process_with_stats(records, platform_filter).contests
}

/// Like [`process`], also counting the records that were dropped.
pub fn process_with_stats(records: &[ContestRecord], platform_filter: Option<&str>) -> Processed {
    let mut processed = Processed::default();

    let matching = records.iter().filter(|record| match platform_filter {
        Some(filter) => record.matches_platform(filter),
        None => true,
    });

    for record in matching {
        match normalize(record) {
            Some(contest) => processed.contests.push(contest),
            None => processed.skipped += 1,
        }
    }

    // Stable: contests starting together keep feed order
    processed.contests.sort_by_key(|c| c.start);
    processed
}

/// Normalize a single record, or `None` if its start or end is unusable.
pub fn normalize(record: &ContestRecord) -> Option<NormalizedContest> {
    let name = non_empty_str(record.contest_name.as_ref()).unwrap_or(UNNAMED_CONTEST);

    let start = parse_contest_date(record.contest_start_date.as_ref());
    let end = parse_contest_date(record.contest_end_date.as_ref());
    let (Some(start), Some(end)) = (start, end) else {
        debug!(contest = name, "skipping contest with invalid date(s)");
        return None;
    };

    Some(NormalizedContest {
        platform: as_str(record.platform.as_ref())
            .map(|p| p.trim().to_string())
            .unwrap_or_default(),
        name: name.to_string(),
        start,
        end,
        url: non_empty_str(record.contest_url.as_ref())
            .unwrap_or(NO_LINK)
            .to_string(),
        uid: record.uid(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::{Value, json};

    fn record(platform: &str, name: &str, start: Value, end: Value) -> ContestRecord {
        serde_json::from_value(json!({
            "platform": platform,
            "contestName": name,
            "contestStartDate": start,
            "contestEndDate": end,
            "contestUrl": format!("https://example.com/{}", name),
            "_id": format!("id-{}", name),
        }))
        .unwrap()
    }

    fn feed() -> Vec<ContestRecord> {
        vec![
            record(
                "leetcode",
                "weekly-441",
                json!("2025-03-23T02:30:00.000Z"),
                json!("2025-03-23T04:00:00.000Z"),
            ),
            record(
                "codeforces",
                "round-1000",
                json!("2025-03-20T14:35:00.000Z"),
                json!("2025-03-20T16:35:00.000Z"),
            ),
            record(
                " LeetCode ",
                "biweekly-152",
                json!("2025-03-22T14:30:00Z"),
                json!("2025-03-22T16:00:00Z"),
            ),
            record("leetcode", "broken", json!("soon"), json!("2025-03-22T16:00:00Z")),
            record("codeforces", "no-end", json!("2025-03-21T14:35:00Z"), Value::Null),
        ]
    }

    #[test]
    fn test_filter_is_case_and_whitespace_insensitive() {
        let contests = process(&feed(), Some("leetcode"));
        let names: Vec<_> = contests.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["biweekly-152", "weekly-441"]);
    }

    #[test]
    fn test_filter_trims_the_filter_too() {
        let contests = process(&feed(), Some("  CODEFORCES "));
        assert_eq!(contests.len(), 1);
        assert_eq!(contests[0].name, "round-1000");
    }

    #[test]
    fn test_no_filter_includes_every_platform() {
        let contests = process(&feed(), None);
        let names: Vec<_> = contests.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["round-1000", "biweekly-152", "weekly-441"]);
    }

    #[test]
    fn test_invalid_dates_are_dropped_and_counted() {
        let all = process_with_stats(&feed(), None);
        assert_eq!(all.skipped, 2);
        assert!(all.contests.iter().all(|c| c.name != "broken" && c.name != "no-end"));

        let leetcode = process_with_stats(&feed(), Some("leetcode"));
        assert_eq!(leetcode.skipped, 1);

        let atcoder = process_with_stats(&feed(), Some("atcoder"));
        assert_eq!(atcoder, Processed::default());
    }

    #[test]
    fn test_output_is_sorted_by_start() {
        let mut records = feed();
        records.reverse();
        let contests = process(&records, None);
        assert!(contests.windows(2).all(|w| w[0].start <= w[1].start));
    }

    #[test]
    fn test_equal_starts_keep_feed_order() {
        let start = json!("2025-03-20T14:35:00Z");
        let end = json!("2025-03-20T16:35:00Z");
        let records = vec![
            record("codechef", "b", start.clone(), end.clone()),
            record("codechef", "a", start.clone(), end.clone()),
            record("codechef", "c", start, end),
        ];
        let names: Vec<_> = process(&records, None).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_normalize_fills_defaults() {
        let record: ContestRecord = serde_json::from_value(json!({
            "platform": " atcoder ",
            "contestName": "",
            "contestStartDate": "2025-03-22T12:00:00Z",
            "contestEndDate": "2025-03-22T13:40:00Z",
        }))
        .unwrap();

        let contest = normalize(&record).unwrap();
        assert_eq!(contest.platform, "atcoder");
        assert_eq!(contest.name, "Unnamed Contest");
        assert_eq!(contest.url, "No link available");
        assert_eq!(contest.start, Utc.with_ymd_and_hms(2025, 3, 22, 12, 0, 0).unwrap());
        assert_eq!(contest.end, Utc.with_ymd_and_hms(2025, 3, 22, 13, 40, 0).unwrap());
        assert_eq!(contest.uid, record.uid());
    }

    #[test]
    fn test_uid_is_the_same_in_every_scope() {
        let records = feed();
        let global = process(&records, None);
        let platform = process(&records, Some("codeforces"));
        let in_global = global.iter().find(|c| c.name == "round-1000").unwrap();
        assert_eq!(in_global.uid, platform[0].uid);
    }
}
