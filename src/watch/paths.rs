// src/watch/paths.rs

//! Enumeration of the files that make up the watched set.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::errors::{CacheWarmerError, Result};
use crate::fs::FileSystem;
use crate::watch::patterns::WatchSpec;

/// Set of absolute file paths in scope for change detection.
pub type PathSet = BTreeSet<PathBuf>;

/// Build the full set of watched files for a project.
///
/// - Every include directory is walked recursively (missing ones are
///   skipped).
/// - With vendor watching on, `vendor` (or each allowed `vendor/<name>`)
///   is walked as well.
/// - Env files at the root and the front controller are always added; a
///   missing front controller is an error.
pub fn build_path_set(fs: &dyn FileSystem, spec: &WatchSpec) -> Result<PathSet> {
    let mut set = PathSet::new();

    set.extend(collect_env_files(fs, spec)?);
    set.insert(front_controller(fs, spec)?);

    for dir in spec.include_dirs() {
        let start = spec.root().join(dir);
        set.extend(find_files(fs, spec, &start)?);
    }

    for vendor_root in spec.vendor_walk_roots() {
        set.extend(find_files(fs, spec, &vendor_root)?);
    }

    debug!(files = set.len(), root = %spec.root().display(), "built watched path set");
    Ok(set)
}

/// Recursively collect the files under `start` that `spec` allows.
///
/// Directories rejected by [`WatchSpec::allows_dir`] are not descended
/// into. Symlinked directories are not followed. A missing `start`
/// contributes nothing; any other I/O error aborts the walk.
pub fn find_files(fs: &dyn FileSystem, spec: &WatchSpec, start: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if !fs.is_dir(start) {
        trace!(dir = %start.display(), "skipping missing directory");
        return Ok(files);
    }
    if !spec.allows_dir(start) {
        trace!(dir = %start.display(), "directory excluded");
        return Ok(files);
    }

    let mut stack = vec![start.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir)? {
            if fs.is_dir(&path) {
                if fs.is_symlink(&path) {
                    trace!(dir = %path.display(), "not following symlinked directory");
                } else if spec.allows_dir(&path) {
                    stack.push(path);
                } else {
                    trace!(dir = %path.display(), "directory excluded");
                }
            } else if fs.is_file(&path) && spec.allows_file(&path) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

/// Files at the project root matching the env-file glob.
pub fn collect_env_files(fs: &dyn FileSystem, spec: &WatchSpec) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in fs.read_dir(spec.root())? {
        let matches = path
            .file_name()
            .map(|n| spec.is_env_file(&n.to_string_lossy()))
            .unwrap_or(false);
        if matches && fs.is_file(&path) {
            files.push(path);
        }
    }
    Ok(files)
}

/// The front controller, which every project must have.
pub fn front_controller(fs: &dyn FileSystem, spec: &WatchSpec) -> Result<PathBuf> {
    let path = spec.front_controller();
    if fs.is_file(&path) {
        Ok(path)
    } else {
        Err(CacheWarmerError::FileNotFound(path))
    }
}
