// tests/format_helpers.rs

use std::time::Duration;

use cache_warmer::format::{
    duration_millis, format_duration, is_semantic_version, parse_comma_separated, version_link,
    REPOSITORY,
};

#[test]
fn durations_list_only_non_zero_parts() {
    assert_eq!(format_duration(0), "0 millisecond(s)");
    assert_eq!(format_duration(42), "42 millisecond(s)");
    assert_eq!(format_duration(1_000), "1 second(s)");
    assert_eq!(format_duration(61_005), "1 minute(s), 1 second(s), 5 millisecond(s)");
    assert_eq!(format_duration(120_000), "2 minute(s)");
}

#[test]
fn duration_millis_saturates() {
    assert_eq!(duration_millis(Duration::from_micros(1_999)), 1);
    assert_eq!(duration_millis(Duration::from_secs(90)), 90_000);
    assert_eq!(duration_millis(Duration::MAX), u64::MAX);
}

#[test]
fn semantic_versions_are_recognised() {
    for v in ["1.2.3", "v0.1.0", "1.0.0-alpha", "2.3.4-rc.1"] {
        assert!(is_semantic_version(v), "{v}");
    }
    for v in ["", "1.2", "nightly", "a1b2c3d", "1.2.3-", "v1.2.3.4"] {
        assert!(!is_semantic_version(v), "{v}");
    }
}

#[test]
fn version_links_point_to_tags_or_commits() {
    assert_eq!(
        version_link("v1.2.3"),
        format!("{REPOSITORY}/releases/tag/v1.2.3")
    );
    assert_eq!(
        version_link("nightly"),
        format!("{REPOSITORY}/releases/tag/nightly")
    );
    assert_eq!(version_link("a1b2c3d"), format!("{REPOSITORY}/commit/a1b2c3d"));
}

#[test]
fn comma_separated_values_are_split_verbatim() {
    assert!(parse_comma_separated("").is_empty());
    assert_eq!(parse_comma_separated("cache.app"), vec!["cache.app"]);
    assert_eq!(parse_comma_separated("a, b"), vec!["a", " b"]);
}
