// src/config/validate.rs

use std::path::Component;
use std::path::Path;
use std::time::Duration;

use crate::config::model::{
    ConsoleSettings, ProjectConfig, RawConfigFile, VendorWatch, WatchSettings,
};
use crate::errors::{CacheWarmerError, Result};
use crate::types::PoolSelection;

impl TryFrom<RawConfigFile> for ProjectConfig {
    type Error = crate::errors::CacheWarmerError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;

        let vendor = if !raw.watch.vendor.is_empty() {
            VendorWatch::Packages(raw.watch.vendor)
        } else if raw.watch.watch_vendor {
            VendorWatch::All
        } else {
            VendorWatch::Off
        };

        let watch = WatchSettings {
            dirs: raw.watch.dirs,
            exclude: raw.watch.exclude,
            vendor_dir: raw.watch.vendor_dir,
            vendor,
            interval: Duration::from_millis(raw.watch.interval_ms),
        };

        let console = ConsoleSettings {
            path: raw.console.path,
            php: raw.console.php,
            env: raw.console.env,
            debug: raw.console.debug,
            mode: raw.console.mode,
            pools: PoolSelection::from_flag(raw.console.pools),
        };

        Ok(ProjectConfig::new_unchecked(raw.root, watch, console))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_root(cfg)?;
    validate_watch_section(cfg)?;
    validate_vendor_packages(cfg)?;
    validate_console_section(cfg)?;
    Ok(())
}

fn validate_root(cfg: &RawConfigFile) -> Result<()> {
    if !cfg.root.is_absolute() {
        return Err(CacheWarmerError::ConfigError(format!(
            "project root must be an absolute path (got {:?})",
            cfg.root
        )));
    }
    Ok(())
}

fn validate_watch_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.interval_ms == 0 {
        return Err(CacheWarmerError::ConfigError(
            "[watch].interval_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    if cfg.watch.dirs.iter().all(|d| d.trim().is_empty()) {
        return Err(CacheWarmerError::ConfigError(
            "[watch].dirs must name at least one directory".to_string(),
        ));
    }

    if cfg.watch.vendor_dir.trim().is_empty() {
        return Err(CacheWarmerError::ConfigError(
            "[watch].vendor_dir must not be empty".to_string(),
        ));
    }

    // An empty fragment is a substring of every path and would exclude everything.
    if cfg.watch.exclude.iter().any(|e| e.is_empty()) {
        return Err(CacheWarmerError::ConfigError(
            "[watch].exclude must not contain empty entries".to_string(),
        ));
    }

    Ok(())
}

fn validate_vendor_packages(cfg: &RawConfigFile) -> Result<()> {
    for name in cfg.watch.vendor.iter() {
        if name.trim().is_empty() {
            return Err(CacheWarmerError::ConfigError(
                "vendor package names must not be empty".to_string(),
            ));
        }

        let escapes = Path::new(name).components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(CacheWarmerError::ConfigError(format!(
                "vendor package '{}' must be a path inside the vendor directory",
                name
            )));
        }
    }
    Ok(())
}

fn validate_console_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.console.path.trim().is_empty() {
        return Err(CacheWarmerError::ConfigError(
            "[console].path must not be empty".to_string(),
        ));
    }
    if cfg.console.php.trim().is_empty() {
        return Err(CacheWarmerError::ConfigError(
            "[console].php must not be empty".to_string(),
        ));
    }
    if cfg.console.env.trim().is_empty() {
        return Err(CacheWarmerError::ConfigError(
            "[console].env must not be empty".to_string(),
        ));
    }
    Ok(())
}
