// src/watch/path_utils.rs

//! Utility functions for path handling in the scanner.

use std::path::{Component, Path};

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// Returns `None` if `path` is not below `root`. The scanner only ever
/// produces paths by joining onto `root`, so no canonicalization is needed.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(rel.to_string_lossy().replace('\\', "/"))
}

/// Normal components of `path` relative to `root`, as strings.
pub fn relative_components<'a>(root: &Path, path: &'a Path) -> Option<Vec<&'a str>> {
    let rel = path.strip_prefix(root).ok()?;
    Some(
        rel.components()
            .filter_map(|c| match c {
                Component::Normal(s) => s.to_str(),
                _ => None,
            })
            .collect(),
    )
}

/// Split a `/`-separated package name (`"acme/bundle"`) into components.
pub fn split_package(name: &str) -> Vec<&str> {
    name.split(['/', '\\']).filter(|s| !s.is_empty()).collect()
}
