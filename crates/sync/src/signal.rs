// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manual-reset signal
//!
//! A [`Signal`] stays set until someone clears it, so every waiter that
//! observes a `set()` returns [`WaitResult::Signaled`]. To detect a new
//! occurrence the owner must `clear()` it first.

use crate::timeout::Timeout;
use std::sync::{Condvar, Mutex};
use std::time::Instant;

/// Outcome of [`Signal::wait`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitResult {
    Signaled,
    TimedOut,
}

impl WaitResult {
    pub fn is_signaled(self) -> bool {
        self == WaitResult::Signaled
    }
}

/// Level-triggered boolean event with bounded waits.
#[derive(Debug, Default)]
pub struct Signal {
    state: Mutex<bool>,
    changed: Condvar,
}

impl Signal {
    /// Create an unsignaled signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the signaled state and wake every waiter.
    ///
    /// Returns `true` if the signal was previously clear.
    pub fn set(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let was_clear = !*state;
        *state = true;
        drop(state);
        self.changed.notify_all();
        was_clear
    }

    /// Move to the unsignaled state. Returns `true` if the signal was set.
    pub fn clear(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *state, false)
    }

    /// Non-blocking read of the current state.
    pub fn is_set(&self) -> bool {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Block until the signal is set or `timeout` elapses.
    ///
    /// A zero timeout polls without blocking.
    pub fn wait(&self, timeout: Timeout) -> WaitResult {
        let deadline = timeout.deadline_from(Instant::now());
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        while !*state {
            state = match deadline {
                None => self
                    .changed
                    .wait(state)
                    .unwrap_or_else(|e| e.into_inner()),
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return WaitResult::TimedOut;
                    }
                    self.changed
                        .wait_timeout(state, deadline - now)
                        .unwrap_or_else(|e| e.into_inner())
                        .0
                }
            };
        }

        WaitResult::Signaled
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
