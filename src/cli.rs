// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::RawConfigFile;
use crate::format::parse_comma_separated;
use crate::types::CacheMode;

/// Command-line arguments for `cache-warmer`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cache-warmer",
    version,
    about = "Watch a Symfony project and refresh its cache whenever a file changes.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the Symfony project (absolute or relative to the current directory).
    #[arg(value_name = "PROJECT")]
    pub project: Option<String>,

    /// Pass `--env=<ENV>` to the Symfony console (default: dev).
    #[arg(long, value_name = "ENV")]
    pub env: Option<String>,

    /// Pass `--no-debug` to the Symfony console.
    #[arg(long)]
    pub no_debug: bool,

    /// Clear the cache instead of only warming it up.
    #[arg(long)]
    pub cache: bool,

    /// Remove `var/cache` before warming up (takes precedence over `--cache`).
    #[arg(long)]
    pub force: bool,

    /// Comma-separated directory fragments not to watch, added to the defaults.
    #[arg(long, value_name = "DIRS")]
    pub exclude: Option<String>,

    /// Comma-separated vendor packages to watch; without a value the whole
    /// vendor directory is watched.
    #[arg(long, value_name = "PACKAGES", num_args = 0..=1, default_missing_value = "")]
    pub vendor: Option<String>,

    /// Comma-separated cache pools to clear after each rebuild; without a
    /// value every pool is cleared.
    #[arg(long, value_name = "POOLS", num_args = 0..=1, default_missing_value = "")]
    pub pools: Option<String>,

    /// Polling interval in milliseconds (default: 30).
    #[arg(long, value_name = "MS")]
    pub interval: Option<u64>,

    /// Path to a TOML config file.
    ///
    /// Default: `.cache-warmer.toml` in the project directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CACHE_WARMER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Scan once, list the watched files and exit without running anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Layer the command-line flags over a config read from file/defaults.
    ///
    /// Flags that were not given leave the file value untouched.
    pub fn apply_to(&self, raw: &mut RawConfigFile) {
        if let Some(env) = &self.env {
            raw.console.env = env.clone();
        }
        if self.no_debug {
            raw.console.debug = false;
        }

        if self.force {
            raw.console.mode = CacheMode::Force;
        } else if self.cache {
            raw.console.mode = CacheMode::Clear;
        }

        if let Some(exclude) = &self.exclude {
            raw.watch.exclude.extend(parse_comma_separated(exclude));
        }

        if let Some(vendor) = &self.vendor {
            let packages = parse_comma_separated(vendor);
            if packages.is_empty() {
                raw.watch.watch_vendor = true;
            } else {
                raw.watch.vendor = packages;
            }
        }

        if let Some(pools) = &self.pools {
            raw.console.pools = Some(parse_comma_separated(pools));
        }

        if let Some(ms) = self.interval {
            raw.watch.interval_ms = ms;
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
