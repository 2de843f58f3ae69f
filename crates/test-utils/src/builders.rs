#![allow(dead_code)]

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tempfile::TempDir;

use cache_warmer::config::{ProjectConfig, RawConfigFile};
use cache_warmer::config::model::{DEFAULT_CONSOLE_PATH, FRONT_CONTROLLER};
use cache_warmer::fs::mock::MockFileSystem;
use cache_warmer::types::CacheMode;

/// Builder for `ProjectConfig` to simplify test setup.
///
/// Starts from the built-in defaults, like a project without a config file.
pub struct ConfigBuilder {
    raw: RawConfigFile,
}

impl ConfigBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let mut raw = RawConfigFile::default();
        raw.root = root.into();
        Self { raw }
    }

    pub fn dirs(mut self, dirs: &[&str]) -> Self {
        self.raw.watch.dirs = dirs.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn exclude(mut self, fragment: &str) -> Self {
        self.raw.watch.exclude.push(fragment.to_string());
        self
    }

    pub fn exclude_only(mut self, fragments: &[&str]) -> Self {
        self.raw.watch.exclude = fragments.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn watch_vendor(mut self, val: bool) -> Self {
        self.raw.watch.watch_vendor = val;
        self
    }

    pub fn vendor_package(mut self, name: &str) -> Self {
        self.raw.watch.vendor.push(name.to_string());
        self
    }

    pub fn interval_ms(mut self, ms: u64) -> Self {
        self.raw.watch.interval_ms = ms;
        self
    }

    pub fn env(mut self, env: &str) -> Self {
        self.raw.console.env = env.to_string();
        self
    }

    pub fn debug(mut self, val: bool) -> Self {
        self.raw.console.debug = val;
        self
    }

    pub fn mode(mut self, mode: CacheMode) -> Self {
        self.raw.console.mode = mode;
        self
    }

    pub fn pools(mut self, pools: &[&str]) -> Self {
        self.raw.console.pools = Some(pools.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn php(mut self, php: &str) -> Self {
        self.raw.console.php = php.to_string();
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.raw
    }

    pub fn build(self) -> ProjectConfig {
        ProjectConfig::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}

/// Fixed point in time used as the base for explicit mtimes.
pub fn epoch_plus(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_700_000_000 + secs)
}

/// A minimal Symfony project on disk, removed on drop.
///
/// Contains `public/index.php`, `bin/console` and `.env`.
pub struct SymfonyProject {
    dir: TempDir,
}

impl SymfonyProject {
    pub fn new() -> io::Result<Self> {
        let project = Self {
            dir: tempfile::tempdir()?,
        };
        project.write(FRONT_CONTROLLER, "<?php\n")?;
        project.write(DEFAULT_CONSOLE_PATH, "#!/usr/bin/env php\n")?;
        project.write(".env", "APP_ENV=dev\n")?;
        Ok(project)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write a file relative to the root, creating parent directories.
    pub fn write(&self, rel: &str, contents: &str) -> io::Result<PathBuf> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn remove(&self, rel: &str) -> io::Result<()> {
        let path = self.path(rel);
        if path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
    }

    /// Set an explicit modification time, independent of clock resolution.
    pub fn set_mtime(&self, rel: &str, time: SystemTime) -> io::Result<()> {
        let file = File::options().write(true).open(self.path(rel))?;
        file.set_modified(time)
    }

    pub fn config(&self) -> ConfigBuilder {
        ConfigBuilder::new(self.root())
    }
}

/// An in-memory Symfony project rooted at `root` (an absolute path).
pub fn mock_project(root: &str) -> MockFileSystem {
    let fs = MockFileSystem::new();
    let root = Path::new(root);
    fs.add_file(root.join(FRONT_CONTROLLER), "<?php\n");
    fs.add_file(root.join(DEFAULT_CONSOLE_PATH), "#!/usr/bin/env php\n");
    fs.add_file(root.join(".env"), "APP_ENV=dev\n");
    fs
}
