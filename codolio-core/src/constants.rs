//! Fixed strings shared across the crate.

/// Upcoming-contests endpoint of the Codolio aggregator.
pub const DEFAULT_ENDPOINT: &str =
    "https://node.codolio.com/api/contest-calendar/v1/all/get-upcoming-contests";

/// Key of the contest list in the feed's top-level object.
pub const FEED_DATA_KEY: &str = "data";

pub const DEFAULT_OUTPUT_DIR: &str = "public";

pub const DEFAULT_PLATFORMS: [&str; 5] =
    ["leetcode", "atcoder", "codeforces", "codechef", "geeksforgeeks"];

pub const DEFAULT_PROD_ID: &str = "-//Codolio Contests//mxm.dk//";

pub const DEFAULT_GLOBAL_CALENDAR_NAME: &str = "Codolio Contests";

/// File stem of the unfiltered document (`codolio_contests.ics`).
pub const GLOBAL_FILE_STEM: &str = "codolio";

/// Appended to every generated file stem.
pub const FILE_SUFFIX: &str = "_contests.ics";

/// Domain part of every event UID.
pub const UID_DOMAIN: &str = "codolio.com";

/// Joins the UID inputs before hashing.
pub const UID_SEPARATOR: &str = "|";

pub const UNNAMED_CONTEST: &str = "Unnamed Contest";

pub const NO_LINK: &str = "No link available";
