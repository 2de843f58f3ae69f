// src/format.rs

//! Small formatting helpers for operator-facing log lines.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

/// Where release tags and commits are published.
pub const REPOSITORY: &str = "https://github.com/lettland/cache-warmer";

/// Version string reported at startup.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const MS_IN_SECOND: u64 = 1_000;
const MS_IN_MINUTE: u64 = 60_000;

/// Format milliseconds as `"1 minute(s), 2 second(s), 3 millisecond(s)"`.
///
/// Zero parts are omitted; a zero duration is `"0 millisecond(s)"`.
pub fn format_duration(ms: u64) -> String {
    let minutes = ms / MS_IN_MINUTE;
    let seconds = (ms % MS_IN_MINUTE) / MS_IN_SECOND;
    let millis = ms % MS_IN_SECOND;

    let mut parts = Vec::new();
    if minutes > 0 {
        parts.push(format!("{minutes} minute(s)"));
    }
    if seconds > 0 {
        parts.push(format!("{seconds} second(s)"));
    }
    if millis > 0 || parts.is_empty() {
        parts.push(format!("{millis} millisecond(s)"));
    }

    parts.join(", ")
}

/// Whole milliseconds of `d`, saturating at `u64::MAX`.
pub fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

fn semver_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^v?\d+\.\d+\.\d+(-[a-zA-Z0-9]+(\.[a-zA-Z0-9]+)*)?$")
            .expect("semver pattern is valid")
    })
}

/// Returns true for `1.2.3`, `v1.2.3` and `1.2.3-alpha.1` style versions.
pub fn is_semantic_version(version: &str) -> bool {
    semver_regex().is_match(version)
}

/// Link to the release tag for semantic versions and `nightly`, or to the
/// commit otherwise.
pub fn version_link(version: &str) -> String {
    if is_semantic_version(version) || version == "nightly" {
        format!("{REPOSITORY}/releases/tag/{version}")
    } else {
        format!("{REPOSITORY}/commit/{version}")
    }
}

/// Split a comma-separated list verbatim; an empty input yields no items.
///
/// Items are not trimmed: `" a , b "` gives `[" a ", " b "]`.
pub fn parse_comma_separated(input: &str) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }
    input.split(',').map(|s| s.to_string()).collect()
}
