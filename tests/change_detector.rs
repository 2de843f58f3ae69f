// tests/change_detector.rs

use std::path::PathBuf;

use cache_warmer::engine::{ChangeDetector, CoreCommand, RebuildOutcome, TickOutcome};
use cache_warmer::errors::CacheWarmerError;
use cache_warmer::watch::FingerprintMap;

fn map(entries: &[(&str, &str)]) -> FingerprintMap {
    entries
        .iter()
        .map(|(p, f)| (PathBuf::from(p), f.to_string()))
        .collect()
}

#[test]
fn equal_map_asks_for_a_sleep() {
    let baseline = map(&[("/app/.env", "1.0"), ("/app/src/A.php", "2.0")]);
    let mut detector = ChangeDetector::new(baseline.clone());

    let step = detector.observe(Ok(baseline));

    assert_eq!(step.outcome, TickOutcome::Unchanged);
    assert_eq!(step.command, CoreCommand::Sleep);
    assert!(!detector.is_reacting());
}

#[test]
fn different_map_asks_for_a_rebuild_and_waits_for_it() {
    let mut detector = ChangeDetector::new(map(&[("/app/src/A.php", "2.0")]));
    let current = map(&[("/app/src/A.php", "3.0")]);

    let step = detector.observe(Ok(current.clone()));
    assert!(step.outcome.is_change());
    assert_eq!(step.command, CoreCommand::Rebuild);
    assert!(detector.is_reacting());

    // While the rebuild is pending, scans are ignored.
    let step = detector.observe(Ok(map(&[("/app/src/A.php", "4.0")])));
    assert_eq!(step.outcome, TickOutcome::RebuildPending);
    assert_eq!(step.command, CoreCommand::Sleep);

    assert_eq!(detector.rebuild_finished(RebuildOutcome::Succeeded), Some(1));
    assert_eq!(detector.baseline(), &current);
    assert_eq!(detector.rebuilds(), 1);
    assert_eq!(detector.failed_rebuilds(), 0);
}

#[test]
fn rebuild_report_without_pending_rebuild_is_ignored() {
    let baseline = map(&[("/app/.env", "1.0")]);
    let mut detector = ChangeDetector::new(baseline.clone());

    assert_eq!(detector.rebuild_finished(RebuildOutcome::Failed), None);
    assert_eq!(detector.baseline(), &baseline);
    assert_eq!(detector.rebuilds(), 0);
}

#[test]
fn failures_are_counted_until_a_scan_succeeds() {
    let baseline = map(&[("/app/.env", "1.0")]);
    let mut detector = ChangeDetector::new(baseline.clone());

    for expected in 1..=3u32 {
        let step = detector.observe(Err(CacheWarmerError::FileNotFound(PathBuf::from(
            "/app/public/index.php",
        ))));
        match step.outcome {
            TickOutcome::ScanFailed {
                consecutive_failures,
                ..
            } => assert_eq!(consecutive_failures, expected),
            other => panic!("expected a scan failure, got {other:?}"),
        }
        assert_eq!(step.command, CoreCommand::Sleep);
    }

    assert_eq!(detector.baseline(), &baseline);
    detector.observe(Ok(baseline));
    assert_eq!(detector.consecutive_failures(), 0);
}

#[test]
fn empty_scan_after_non_empty_baseline_is_a_change() {
    let mut detector = ChangeDetector::new(map(&[("/app/.env", "1.0")]));

    match detector.observe(Ok(FingerprintMap::new())).outcome {
        TickOutcome::Changed(changes) => {
            assert_eq!(changes.removed, vec![PathBuf::from("/app/.env")]);
        }
        other => panic!("expected a change, got {other:?}"),
    }
}
