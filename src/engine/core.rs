// src/engine/core.rs

//! Pure change-detection state machine.
//!
//! The detector consumes the result of one scan and decides what the IO
//! shell should do next:
//! - nothing changed: sleep for the polling interval
//! - something changed: run the rebuild, then report back with
//!   [`ChangeDetector::rebuild_finished`]
//!
//! It owns the baseline and never touches the filesystem, processes or
//! timers, so it can be unit tested with hand-built maps.

use crate::errors::Result;
use crate::watch::{diff_maps, FingerprintMap};

use super::{CoreCommand, CoreStep, RebuildOutcome, TickOutcome};

#[derive(Debug)]
enum DetectorState {
    /// Waiting for the next scan.
    Idle,
    /// A rebuild was requested for `candidate`, which becomes the baseline
    /// once the rebuild finishes.
    Reacting { candidate: FingerprintMap },
}

#[derive(Debug)]
pub struct ChangeDetector {
    baseline: FingerprintMap,
    state: DetectorState,
    consecutive_failures: u32,
    rebuilds: u64,
    failed_rebuilds: u64,
}

impl ChangeDetector {
    pub fn new(baseline: FingerprintMap) -> Self {
        Self {
            baseline,
            state: DetectorState::Idle,
            consecutive_failures: 0,
            rebuilds: 0,
            failed_rebuilds: 0,
        }
    }

    /// The last state acted upon.
    pub fn baseline(&self) -> &FingerprintMap {
        &self.baseline
    }

    pub fn is_reacting(&self) -> bool {
        matches!(self.state, DetectorState::Reacting { .. })
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Number of rebuilds completed so far.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Number of completed rebuilds that reported a failure.
    pub fn failed_rebuilds(&self) -> u64 {
        self.failed_rebuilds
    }

    /// Feed the result of one scan into the detector.
    ///
    /// - A failed scan keeps the baseline and asks for a sleep.
    /// - A map equal to the baseline asks for a sleep.
    /// - Any difference moves the detector to `Reacting` and asks for a
    ///   rebuild. While reacting, further scans are ignored so one change
    ///   never causes two rebuilds.
    pub fn observe(&mut self, scan: Result<FingerprintMap>) -> CoreStep {
        if self.is_reacting() {
            return CoreStep {
                outcome: TickOutcome::RebuildPending,
                command: CoreCommand::Sleep,
            };
        }

        let current = match scan {
            Ok(map) => map,
            Err(err) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                return CoreStep {
                    outcome: TickOutcome::ScanFailed {
                        error: err.to_string(),
                        consecutive_failures: self.consecutive_failures,
                    },
                    command: CoreCommand::Sleep,
                };
            }
        };
        self.consecutive_failures = 0;

        if current == self.baseline {
            return CoreStep {
                outcome: TickOutcome::Unchanged,
                command: CoreCommand::Sleep,
            };
        }

        let changes = diff_maps(&self.baseline, &current);
        self.state = DetectorState::Reacting { candidate: current };

        CoreStep {
            outcome: TickOutcome::Changed(changes),
            command: CoreCommand::Rebuild,
        }
    }

    /// Report that the requested rebuild has returned.
    ///
    /// The candidate map is adopted as the new baseline whether or not the
    /// rebuild succeeded: the files did change either way. Returns the
    /// number of files in the new baseline, or `None` if no rebuild was
    /// pending.
    pub fn rebuild_finished(&mut self, outcome: RebuildOutcome) -> Option<usize> {
        match std::mem::replace(&mut self.state, DetectorState::Idle) {
            DetectorState::Reacting { candidate } => {
                self.baseline = candidate;
                self.rebuilds += 1;
                if outcome == RebuildOutcome::Failed {
                    self.failed_rebuilds += 1;
                }
                Some(self.baseline.len())
            }
            DetectorState::Idle => None,
        }
    }
}
