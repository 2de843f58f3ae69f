// src/project.rs

//! Locating the Symfony project and its console.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ProjectConfig;
use crate::errors::{CacheWarmerError, Result};
use crate::fs::FileSystem;

/// Resolve the project directory from the command-line argument.
///
/// Relative paths are resolved against `cwd`. Fails if no path was given
/// or if it is not an existing directory.
pub fn locate_project_root(
    fs: &dyn FileSystem,
    arg: Option<&str>,
    cwd: &Path,
) -> Result<PathBuf> {
    let arg = match arg {
        Some(a) if !a.trim().is_empty() => a,
        _ => return Err(CacheWarmerError::NoProjectPath),
    };

    let candidate = Path::new(arg);
    let path = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        cwd.join(candidate)
    };

    if !fs.is_dir(&path) {
        return Err(CacheWarmerError::ProjectNotFound(path));
    }

    debug!(root = %path.display(), "located project directory");
    Ok(path)
}

/// Check that the Symfony console exists and return its absolute path.
pub fn verify_console(fs: &dyn FileSystem, cfg: &ProjectConfig) -> Result<PathBuf> {
    let path = cfg.console_path();
    if fs.is_file(&path) {
        Ok(path)
    } else {
        Err(CacheWarmerError::ConsoleNotFound(path))
    }
}
