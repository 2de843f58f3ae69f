// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::errors::Result;
use crate::exec::WarmupBackend;
use crate::format::{duration_millis, format_duration};
use crate::fs::FileSystem;
use crate::watch::path_utils::relative_str;
use crate::watch::{self, ChangeSet, FingerprintMap, WatchSpec};

use super::core::ChangeDetector;
use super::{CoreCommand, RebuildOutcome, TickOutcome};

/// Changed paths listed individually at debug level.
const MAX_LOGGED_CHANGES: usize = 10;

/// Polls the project and rebuilds the cache when files change.
///
/// This is the IO shell around [`ChangeDetector`]: it scans the
/// filesystem, runs the rebuild through a [`WarmupBackend`] and sleeps
/// between scans. Ticks never overlap and the rebuild is awaited inline, so
/// at most one rebuild is in flight.
pub struct Monitor<B: WarmupBackend> {
    fs: Arc<dyn FileSystem>,
    spec: WatchSpec,
    interval: Duration,
    detector: ChangeDetector,
    backend: B,
}

impl<B: WarmupBackend> fmt::Debug for Monitor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Monitor")
            .field("spec", &self.spec)
            .field("interval", &self.interval)
            .field("detector", &self.detector)
            .finish_non_exhaustive()
    }
}

impl<B: WarmupBackend> Monitor<B> {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        spec: WatchSpec,
        interval: Duration,
        baseline: FingerprintMap,
        backend: B,
    ) -> Self {
        Self {
            fs,
            spec,
            interval,
            detector: ChangeDetector::new(baseline),
            backend,
        }
    }

    /// Run one scan against the current filesystem.
    ///
    /// Used for the initial baseline and by every tick.
    pub fn scan(&self) -> Result<FingerprintMap> {
        watch::scan(self.fs.as_ref(), &self.spec)
    }

    pub fn baseline(&self) -> &FingerprintMap {
        self.detector.baseline()
    }

    pub fn detector(&self) -> &ChangeDetector {
        &self.detector
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Main polling loop. Never returns; the process is stopped from outside.
    pub async fn run(mut self) {
        info!(
            interval_ms = duration_millis(self.interval),
            files = self.detector.baseline().len(),
            "monitoring started"
        );

        loop {
            let outcome = self.tick().await;
            if !outcome.is_change() {
                tokio::time::sleep(self.interval).await;
            }
        }
    }

    /// One iteration: scan, compare with the baseline and rebuild on change.
    ///
    /// Does not sleep; [`Monitor::run`] sleeps after ticks without a change.
    pub async fn tick(&mut self) -> TickOutcome {
        let scan = self.scan();
        let step = self.detector.observe(scan);

        match (&step.outcome, step.command) {
            (TickOutcome::ScanFailed { error, consecutive_failures }, _) => {
                warn!(
                    consecutive_failures = *consecutive_failures,
                    error = %error,
                    "scan failed; keeping previous state and retrying"
                );
            }
            (TickOutcome::Changed(changes), CoreCommand::Rebuild) => {
                self.log_changes(changes);
                self.rebuild().await;
            }
            (TickOutcome::RebuildPending, _) => {
                debug!("rebuild still pending; scan ignored");
            }
            _ => {}
        }

        step.outcome
    }

    async fn rebuild(&mut self) {
        let started = Instant::now();

        let outcome = match self.backend.run_cache_warmup().await {
            Ok(output) => {
                let elapsed = duration_millis(started.elapsed());
                info!(elapsed = %format_duration(elapsed), "cache refreshed");
                if !output.trim().is_empty() {
                    debug!(output = %output.trim(), "rebuild output");
                }
                RebuildOutcome::Succeeded
            }
            Err(err) => {
                let elapsed = duration_millis(started.elapsed());
                error!(
                    elapsed = %format_duration(elapsed),
                    error = %err,
                    "cache refresh failed; monitoring continues"
                );
                RebuildOutcome::Failed
            }
        };

        if let Some(files) = self.detector.rebuild_finished(outcome) {
            info!(
                files,
                root = %self.spec.root().display(),
                "file(s) watched"
            );
        }
    }

    fn log_changes(&self, changes: &ChangeSet) {
        info!(
            added = changes.added.len(),
            removed = changes.removed.len(),
            modified = changes.modified.len(),
            "update detected; refreshing cache"
        );

        for path in changes.paths().take(MAX_LOGGED_CHANGES) {
            let shown = relative_str(self.spec.root(), path)
                .unwrap_or_else(|| path.display().to_string());
            debug!(path = %shown, "changed");
        }
        if changes.len() > MAX_LOGGED_CHANGES {
            debug!(more = changes.len() - MAX_LOGGED_CHANGES, "further changes not listed");
        }
    }
}
