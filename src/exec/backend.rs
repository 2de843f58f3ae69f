// src/exec/backend.rs

//! Pluggable rebuild backend abstraction.
//!
//! The monitor talks to a `WarmupBackend` instead of spawning processes
//! itself. Production uses [`ConsoleBackend`], which drives the Symfony
//! console; tests provide a fake that records calls and returns canned
//! results.

use std::future::Future;
use std::pin::Pin;

use crate::config::ProjectConfig;
use crate::errors::Result;

use super::command::SymfonyConsole;

/// Trait abstracting how the cache is rebuilt.
pub trait WarmupBackend: Send {
    /// Rebuild the cache and return the captured output.
    ///
    /// Errors are reported by the monitor but never stop it.
    fn run_cache_warmup(&mut self) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>>;
}

/// Real backend used in production: runs the Symfony console.
#[derive(Debug, Clone)]
pub struct ConsoleBackend {
    console: SymfonyConsole,
}

impl ConsoleBackend {
    pub fn new(console: SymfonyConsole) -> Self {
        Self { console }
    }

    pub fn from_config(cfg: &ProjectConfig) -> Self {
        Self::new(SymfonyConsole::from_config(cfg))
    }

    pub fn console(&self) -> &SymfonyConsole {
        &self.console
    }
}

impl WarmupBackend for ConsoleBackend {
    fn run_cache_warmup(&mut self) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>> {
        // Clone so the future doesn't borrow `self` across `await`.
        let console = self.console.clone();

        Box::pin(async move { console.cache_warmup().await })
    }
}
