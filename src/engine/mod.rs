// src/engine/mod.rs

//! Monitoring engine.
//!
//! The pure change-detection state machine lives in [`core`]; the async
//! polling shell that scans the filesystem, sleeps and runs the rebuild is
//! implemented in [`runtime`].

use crate::watch::ChangeSet;

/// What a single tick observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The scan matched the baseline.
    Unchanged,
    /// The scan differed from the baseline; a rebuild was requested.
    Changed(ChangeSet),
    /// The scan itself failed; the baseline was kept.
    ScanFailed {
        error: String,
        consecutive_failures: u32,
    },
    /// A rebuild is still awaiting completion; the scan was ignored.
    RebuildPending,
}

impl TickOutcome {
    pub fn is_change(&self) -> bool {
        matches!(self, TickOutcome::Changed(_))
    }
}

/// Command produced by the pure core, to be executed by the IO shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreCommand {
    /// Wait one polling interval before the next scan.
    Sleep,
    /// Run the rebuild action, then report back to the core.
    Rebuild,
}

/// Decision returned by the core after observing one scan.
#[derive(Debug, Clone)]
pub struct CoreStep {
    pub outcome: TickOutcome,
    pub command: CoreCommand,
}

/// How the rebuild action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    Succeeded,
    Failed,
}

pub mod core;
pub mod runtime;

pub use core::ChangeDetector;
pub use runtime::Monitor;
