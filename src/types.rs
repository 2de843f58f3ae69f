use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// What the rebuild action does to the Symfony cache.
///
/// - `Warmup`: run `cache:warmup` (default).
/// - `Clear`: run `cache:clear`, which also warms the cache back up.
/// - `Force`: delete `var/cache` from disk, then run `cache:warmup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    #[default]
    Warmup,
    Clear,
    Force,
}

impl CacheMode {
    /// Console sub-command run for this mode.
    pub fn console_command(self) -> &'static str {
        match self {
            CacheMode::Warmup | CacheMode::Force => "cache:warmup",
            CacheMode::Clear => "cache:clear",
        }
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CacheMode::Warmup => "warmup",
            CacheMode::Clear => "clear",
            CacheMode::Force => "force",
        };
        f.write_str(s)
    }
}

impl FromStr for CacheMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warmup" => Ok(CacheMode::Warmup),
            "clear" => Ok(CacheMode::Clear),
            "force" => Ok(CacheMode::Force),
            other => Err(format!(
                "invalid cache mode: {other} (expected \"warmup\", \"clear\" or \"force\")"
            )),
        }
    }
}

/// Which cache pools to clear after the rebuild, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PoolSelection {
    /// `--pools` was not given.
    #[default]
    None,
    /// `--pools` was given without names: clear every pool.
    All,
    /// Clear only the named pools.
    Named(Vec<String>),
}

impl PoolSelection {
    /// Build a selection from the raw `--pools` value.
    ///
    /// `None` means the flag was absent; `Some(empty)` means it was given
    /// without any pool names.
    pub fn from_flag(values: Option<Vec<String>>) -> Self {
        match values {
            None => PoolSelection::None,
            Some(v) if v.is_empty() => PoolSelection::All,
            Some(v) => PoolSelection::Named(v),
        }
    }

    /// Arguments passed to `cache:pool:clear`, or `None` if nothing is cleared.
    pub fn console_args(&self) -> Option<Vec<String>> {
        match self {
            PoolSelection::None => None,
            PoolSelection::All => Some(vec!["--all".to_string()]),
            PoolSelection::Named(pools) => Some(pools.clone()),
        }
    }
}
