// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator lifecycle phase
//!
//! ```text
//! Idle -> Running -> StopRequested -> Stopping -> Stopped
//!            |                           ^          |
//!            +---------------------------+          |
//!            ^                                      |
//!            +------------------ run() -------------+
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Never run
    Idle = 0,
    /// Loop is calling the work-step
    Running = 1,
    /// A stop was requested and the loop has not exited yet
    StopRequested = 2,
    /// Loop exited; the stopped signal is not raised yet
    Stopping = 3,
    /// Loop exited and the stopped signal is raised
    Stopped = 4,
}

impl Phase {
    /// Phases in which the loop is live
    pub fn is_running(self) -> bool {
        matches!(self, Phase::Running | Phase::StopRequested)
    }

    /// Phases in which a new run may start
    pub fn can_start(self) -> bool {
        matches!(self, Phase::Idle | Phase::Stopped)
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Phase::Idle,
            1 => Phase::Running,
            2 => Phase::StopRequested,
            3 => Phase::Stopping,
            _ => Phase::Stopped,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::StopRequested => "stop-requested",
            Phase::Stopping => "stopping",
            Phase::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Atomic cell holding a [`Phase`], readable without a lock.
#[derive(Debug)]
pub(crate) struct PhaseCell(AtomicU8);

impl PhaseCell {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(Phase::Idle as u8))
    }

    pub(crate) fn get(&self) -> Phase {
        Phase::from_u8(self.0.load(Ordering::SeqCst))
    }

    pub(crate) fn set(&self, phase: Phase) {
        self.0.store(phase as u8, Ordering::SeqCst);
    }

    /// Move `from -> to` only if the cell still holds `from`.
    pub(crate) fn transition(&self, from: Phase, to: Phase) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}
