// src/config/model.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::types::{CacheMode, PoolSelection};

/// Relative path to the Symfony console (Symfony/Flex layout).
pub const DEFAULT_CONSOLE_PATH: &str = "bin/console";
/// PHP interpreter used to run the console.
pub const DEFAULT_PHP_BINARY: &str = "php";
/// `APP_ENV` passed as `--env`.
pub const DEFAULT_ENV: &str = "dev";

pub const DIR_CONFIG: &str = "config";
pub const DIR_SRC: &str = "src";
pub const DIR_TEMPLATES: &str = "templates";
pub const DIR_TRANSLATIONS: &str = "translations";
pub const DIR_MIGRATIONS: &str = "migrations";
pub const DIR_VENDOR: &str = "vendor";

/// Cache directory removed by [`CacheMode::Force`].
pub const DIR_VAR_CACHE: &str = "var/cache";

/// Directory fragments that are never watched.
pub const DEFAULT_EXCLUDED_DIRS: [&str; 3] = [".git", ".github", "node_modules"];

/// Sleep between two filesystem scans.
pub const DEFAULT_INTERVAL_MS: u64 = 30;

/// Env files at the project root (`.env`, `.env.local`, ...).
pub const ENV_FILE_GLOB: &str = ".env*";
/// Front controller; a project without it is not a Symfony project.
pub const FRONT_CONTROLLER: &str = "public/index.php";
/// Files with this suffix are never watched.
pub const IGNORE_FILE_SUFFIX: &str = ".gitignore";

/// Config file looked up in the project root when `--config` is not given.
pub const PROJECT_CONFIG_FILE: &str = ".cache-warmer.toml";

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [watch]
/// dirs = ["config", "src", "templates", "translations", "migrations"]
/// exclude = [".git", ".github", "node_modules"]
/// vendor = ["acme/bundle"]
/// interval_ms = 30
///
/// [console]
/// path = "bin/console"
/// env = "dev"
/// mode = "warmup"
/// ```
///
/// All sections are optional and have reasonable defaults. The project
/// root is never read from the file; it is set by the caller after
/// locating the project.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(skip)]
    pub root: PathBuf,

    /// `[watch]` section.
    #[serde(default)]
    pub watch: WatchSection,

    /// `[console]` section.
    #[serde(default)]
    pub console: ConsoleSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Directories (relative to the root) scanned recursively.
    #[serde(default = "default_dirs")]
    pub dirs: Vec<String>,

    /// Directory name fragments to skip. Matched as substrings of the full
    /// directory path.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Name of the dependency directory.
    #[serde(default = "default_vendor_dir")]
    pub vendor_dir: String,

    /// Watch the whole vendor directory.
    #[serde(default)]
    pub watch_vendor: bool,

    /// Vendor packages to watch (e.g. `"symfony/framework-bundle"`).
    /// A non-empty list turns vendor watching on.
    #[serde(default)]
    pub vendor: Vec<String>,

    /// Polling interval in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_dirs() -> Vec<String> {
    [DIR_CONFIG, DIR_SRC, DIR_TEMPLATES, DIR_TRANSLATIONS, DIR_MIGRATIONS]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_exclude() -> Vec<String> {
    DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect()
}

fn default_vendor_dir() -> String {
    DIR_VENDOR.to_string()
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            dirs: default_dirs(),
            exclude: default_exclude(),
            vendor_dir: default_vendor_dir(),
            watch_vendor: false,
            vendor: Vec::new(),
            interval_ms: default_interval_ms(),
        }
    }
}

/// `[console]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleSection {
    /// Console path relative to the project root.
    #[serde(default = "default_console_path")]
    pub path: String,

    #[serde(default = "default_php")]
    pub php: String,

    #[serde(default = "default_env")]
    pub env: String,

    /// `false` passes `--no-debug` to the console.
    #[serde(default = "default_debug")]
    pub debug: bool,

    #[serde(default)]
    pub mode: CacheMode,

    /// Cache pools cleared after each rebuild. An empty list clears all
    /// pools; a missing key clears none.
    #[serde(default)]
    pub pools: Option<Vec<String>>,
}

fn default_console_path() -> String {
    DEFAULT_CONSOLE_PATH.to_string()
}

fn default_php() -> String {
    DEFAULT_PHP_BINARY.to_string()
}

fn default_env() -> String {
    DEFAULT_ENV.to_string()
}

fn default_debug() -> bool {
    true
}

impl Default for ConsoleSection {
    fn default() -> Self {
        Self {
            path: default_console_path(),
            php: default_php(),
            env: default_env(),
            debug: default_debug(),
            mode: CacheMode::default(),
            pools: None,
        }
    }
}

/// Which part of the vendor directory is scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorWatch {
    /// The vendor directory is skipped entirely.
    Off,
    /// The whole vendor directory is scanned.
    All,
    /// Only `vendor/<name>` for each listed package is scanned.
    Packages(Vec<String>),
}

impl VendorWatch {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, VendorWatch::Off)
    }

    /// Allowed package names; empty when off or when watching everything.
    pub fn packages(&self) -> &[String] {
        match self {
            VendorWatch::Packages(p) => p,
            _ => &[],
        }
    }
}

/// What to scan and how often.
#[derive(Debug, Clone)]
pub struct WatchSettings {
    pub dirs: Vec<String>,
    pub exclude: Vec<String>,
    pub vendor_dir: String,
    pub vendor: VendorWatch,
    pub interval: Duration,
}

/// How to run the Symfony console.
#[derive(Debug, Clone)]
pub struct ConsoleSettings {
    pub path: String,
    pub php: String,
    pub env: String,
    pub debug: bool,
    pub mode: CacheMode,
    pub pools: PoolSelection,
}

/// Validated, immutable project configuration.
///
/// Constructed from a [`RawConfigFile`] via `TryFrom`; see
/// [`crate::config::validate`].
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    root: PathBuf,
    watch: WatchSettings,
    console: ConsoleSettings,
}

impl ProjectConfig {
    pub(crate) fn new_unchecked(
        root: PathBuf,
        watch: WatchSettings,
        console: ConsoleSettings,
    ) -> Self {
        Self {
            root,
            watch,
            console,
        }
    }

    /// Absolute project directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn watch(&self) -> &WatchSettings {
        &self.watch
    }

    pub fn console(&self) -> &ConsoleSettings {
        &self.console
    }

    pub fn interval(&self) -> Duration {
        self.watch.interval
    }

    /// Absolute path of the Symfony console.
    pub fn console_path(&self) -> PathBuf {
        self.root.join(&self.console.path)
    }
}
