// tests/fingerprint.rs

mod common;
use crate::common::builders::{epoch_plus, mock_project, SymfonyProject};
use crate::common::{default_spec, TestResult, ROOT};

use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

use cache_warmer::config::VendorWatch;
use cache_warmer::errors::CacheWarmerError;
use cache_warmer::fs::RealFileSystem;
use cache_warmer::watch::{
    build_fingerprint_map, diff_maps, fingerprint_of, scan, PathSet, WatchSpec,
};

#[test]
fn fingerprint_is_seconds_and_nanoseconds_since_epoch() {
    assert_eq!(
        fingerprint_of(UNIX_EPOCH + Duration::from_millis(1_500)),
        "1.500000000"
    );
    assert_eq!(fingerprint_of(UNIX_EPOCH), "0.000000000");
    assert_eq!(
        fingerprint_of(UNIX_EPOCH - Duration::from_secs(2)),
        "-2.000000000"
    );
}

#[test]
fn scanning_twice_without_changes_gives_equal_maps() -> TestResult {
    let fs = mock_project(ROOT);
    let root = Path::new(ROOT);
    fs.add_file(root.join("src/Kernel.php"), "<?php\n");
    fs.add_file(root.join("config/routes.yaml"), "\n");

    let spec = default_spec(root, VendorWatch::Off);
    let first = scan(&fs, &spec)?;
    let second = scan(&fs, &spec)?;

    assert_eq!(first.len(), 4);
    assert_eq!(first, second);
    assert!(diff_maps(&first, &second).is_empty());
    Ok(())
}

#[test]
fn edit_delete_and_add_are_reported_separately() -> TestResult {
    let fs = mock_project(ROOT);
    let root = Path::new(ROOT);
    let kernel = root.join("src/Kernel.php");
    let user = root.join("src/Entity/User.php");
    let order = root.join("src/Entity/Order.php");
    fs.add_file_at(&kernel, "<?php\n", epoch_plus(0));
    fs.add_file_at(&user, "<?php\n", epoch_plus(0));

    let spec = default_spec(root, VendorWatch::Off);
    let before = scan(&fs, &spec)?;

    fs.touch(&kernel, epoch_plus(10))?;
    let after_edit = scan(&fs, &spec)?;
    assert_ne!(before, after_edit);
    let changes = diff_maps(&before, &after_edit);
    assert_eq!(changes.modified, vec![kernel.clone()]);
    assert!(changes.added.is_empty() && changes.removed.is_empty());

    fs.remove(&user);
    let after_delete = scan(&fs, &spec)?;
    let changes = diff_maps(&after_edit, &after_delete);
    assert_eq!(changes.removed, vec![user.clone()]);
    assert_eq!(changes.len(), 1);

    fs.add_file_at(&order, "<?php\n", epoch_plus(20));
    let after_add = scan(&fs, &spec)?;
    let changes = diff_maps(&after_delete, &after_add);
    assert_eq!(changes.added, vec![order.clone()]);
    assert_eq!(changes.paths().collect::<Vec<_>>(), vec![&order]);
    Ok(())
}

#[test]
fn same_mtime_rewrite_is_invisible() -> TestResult {
    let fs = mock_project(ROOT);
    let root = Path::new(ROOT);
    let kernel = root.join("src/Kernel.php");
    fs.add_file_at(&kernel, "<?php\n", epoch_plus(5));

    let spec = default_spec(root, VendorWatch::Off);
    let before = scan(&fs, &spec)?;

    // Content changes but the modification time is restored.
    fs.add_file_at(&kernel, "<?php // edited\n", epoch_plus(5));
    let after = scan(&fs, &spec)?;

    assert_eq!(before, after);
    Ok(())
}

#[test]
fn unreadable_file_fails_the_whole_map() {
    let fs = mock_project(ROOT);
    let root = Path::new(ROOT);
    let gone = root.join("src/Gone.php");

    let mut paths = PathSet::new();
    paths.insert(root.join(".env"));
    paths.insert(gone.clone());

    let err = build_fingerprint_map(&fs, &paths).unwrap_err();
    match &err {
        CacheWarmerError::StatError { path, .. } => assert_eq!(path, &gone),
        other => panic!("expected StatError, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("Gone.php"), "{message}");
    assert!(message.contains("permissions"), "{message}");
}

#[test]
fn real_modification_time_change_is_detected() -> TestResult {
    let project = SymfonyProject::new()?;
    project.write("src/Kernel.php", "<?php\n")?;
    project.set_mtime("src/Kernel.php", epoch_plus(0))?;

    let cfg = project.config().build();
    let spec = WatchSpec::from_config(&cfg)?;
    let before = scan(&RealFileSystem, &spec)?;

    project.set_mtime("src/Kernel.php", epoch_plus(60))?;
    let after = scan(&RealFileSystem, &spec)?;

    let changes = diff_maps(&before, &after);
    let kernel: PathBuf = project.path("src/Kernel.php");
    assert_eq!(changes.modified, vec![kernel.clone()]);
    assert_eq!(after.get(&kernel).map(String::as_str), Some("1700000060.000000000"));
    Ok(())
}
