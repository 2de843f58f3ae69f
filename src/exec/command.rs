// src/exec/command.rs

//! Symfony console invocations.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::ProjectConfig;
use crate::config::model::DIR_VAR_CACHE;
use crate::errors::{CacheWarmerError, Result};
use crate::types::{CacheMode, PoolSelection};

/// Everything needed to run `php bin/console ...` for one project.
#[derive(Debug, Clone)]
pub struct SymfonyConsole {
    root: PathBuf,
    php: String,
    console: PathBuf,
    env: String,
    debug: bool,
    mode: CacheMode,
    pools: PoolSelection,
}

impl SymfonyConsole {
    pub fn from_config(cfg: &ProjectConfig) -> Self {
        let console = cfg.console();
        Self {
            root: cfg.root().to_path_buf(),
            php: console.php.clone(),
            console: cfg.console_path(),
            env: console.env.clone(),
            debug: console.debug,
            mode: console.mode,
            pools: console.pools.clone(),
        }
    }

    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    /// `--env=<env>` plus `--no-debug` when debug is off.
    fn env_args(&self) -> Vec<String> {
        let mut args = vec![format!("--env={}", self.env)];
        if !self.debug {
            args.push("--no-debug".to_string());
        }
        args
    }

    /// Arguments of the rebuild command for the configured mode.
    pub fn rebuild_args(&self) -> Vec<String> {
        let mut args = vec![self.mode.console_command().to_string()];
        args.extend(self.env_args());
        args
    }

    /// Arguments of the pool-clearing command, if pools were requested.
    pub fn pool_clear_args(&self) -> Option<Vec<String>> {
        let pools = self.pools.console_args()?;
        let mut args = vec!["cache:pool:clear".to_string()];
        args.extend(pools);
        args.extend(self.env_args());
        Some(args)
    }

    /// Human-readable command line, for logs and errors.
    pub fn describe(&self, args: &[String]) -> String {
        let mut parts = vec![self.php.clone(), self.console.display().to_string()];
        parts.extend(args.iter().cloned());
        parts.join(" ")
    }

    /// Rebuild the cache according to the configured mode.
    ///
    /// - `Force` first deletes `var/cache` (a missing directory is fine).
    /// - Requested pools are cleared after the rebuild.
    ///
    /// Returns the combined output of every command that ran.
    pub async fn cache_warmup(&self) -> Result<String> {
        if self.mode == CacheMode::Force {
            self.remove_cache_dir().await?;
        }

        let mut output = self.run(&self.rebuild_args()).await?;

        if let Some(args) = self.pool_clear_args() {
            output.push_str(&self.run(&args).await?);
        }

        Ok(output)
    }

    /// `php bin/console --version`, trimmed (e.g. `"Symfony 7.1.3 (env: dev, debug: true)"`).
    pub async fn version(&self) -> Result<String> {
        let output = self.run(&["--version".to_string()]).await?;
        Ok(output.trim().to_string())
    }

    async fn remove_cache_dir(&self) -> Result<()> {
        let dir = self.root.join(DIR_VAR_CACHE);
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => {
                info!(dir = %dir.display(), "removed cache directory");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(dir = %dir.display(), "cache directory already absent");
                Ok(())
            }
            Err(e) => Err(CacheWarmerError::IoError(e)),
        }
    }

    /// Run the console with `args` in the project root and capture its output.
    async fn run(&self, args: &[String]) -> Result<String> {
        let command = self.describe(args);
        debug!(cmd = %command, "running console command");

        let output = Command::new(&self.php)
            .arg(&self.console)
            .args(args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("spawning `{command}`"))?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            Ok(text)
        } else {
            Err(CacheWarmerError::CommandFailed {
                command,
                code: output.status.code().unwrap_or(-1),
                output: text.trim().to_string(),
            })
        }
    }
}
