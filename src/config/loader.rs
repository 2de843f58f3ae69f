// src/config/loader.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{PROJECT_CONFIG_FILE, ProjectConfig, RawConfigFile};
use crate::errors::{CacheWarmerError, Result};
use crate::fs::FileSystem;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Read the raw configuration for the project at `root`.
///
/// - An explicit path (from `--config`) must exist.
/// - Otherwise `<root>/.cache-warmer.toml` is used when present.
/// - Otherwise built-in defaults apply.
///
/// The returned config has `root` filled in.
pub fn load_raw_for_project(
    fs: &dyn FileSystem,
    root: &Path,
    explicit: Option<&Path>,
) -> Result<RawConfigFile> {
    let mut raw = match explicit {
        Some(path) => {
            if !fs.is_file(path) {
                return Err(CacheWarmerError::ConfigError(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            debug!(path = %path.display(), "loading config file");
            load_from_path(fs, path)?
        }
        None => {
            let path = default_config_path(root);
            if fs.is_file(&path) {
                debug!(path = %path.display(), "loading project config file");
                load_from_path(fs, &path)?
            } else {
                RawConfigFile::default()
            }
        }
    };

    raw.root = root.to_path_buf();
    Ok(raw)
}

/// Load the project configuration and run validation.
pub fn load_and_validate(
    fs: &dyn FileSystem,
    root: &Path,
    explicit: Option<&Path>,
) -> Result<ProjectConfig> {
    let raw = load_raw_for_project(fs, root, explicit)?;
    ProjectConfig::try_from(raw)
}

/// Project-local config file location.
pub fn default_config_path(root: &Path) -> PathBuf {
    root.join(PROJECT_CONFIG_FILE)
}
