#![allow(dead_code, unused_imports)]

use std::path::Path;
use std::sync::Arc;

pub use cache_warmer_test_utils::builders;
pub use cache_warmer_test_utils::fake_backend::FakeBackend;
pub use cache_warmer_test_utils::init_tracing;

use cache_warmer::config::VendorWatch;
use cache_warmer::fs::FileSystem;
use cache_warmer::fs::mock::MockFileSystem;
use cache_warmer::watch::WatchSpec;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub const ROOT: &str = "/srv/app";

/// Scan rules with the default include/exclude lists.
pub fn default_spec(root: &Path, vendor: VendorWatch) -> WatchSpec {
    WatchSpec::new(
        root,
        ["config", "src", "templates", "translations", "migrations"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        [".git", ".github", "node_modules"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        "vendor",
        vendor,
    )
    .expect("default scan rules compile")
}

/// Root-relative, forward-slash paths, sorted.
pub fn relative(root: &Path, paths: impl IntoIterator<Item = impl AsRef<Path>>) -> Vec<String> {
    let mut out: Vec<String> = paths
        .into_iter()
        .map(|p| {
            p.as_ref()
                .strip_prefix(root)
                .expect("path below root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    out.sort();
    out
}

pub fn shared(fs: &MockFileSystem) -> Arc<dyn FileSystem> {
    Arc::new(fs.clone())
}
