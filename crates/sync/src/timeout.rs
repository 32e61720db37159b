// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timeouts for blocking operations

use std::fmt;
use std::time::{Duration, Instant};

/// How long a blocking call may wait before giving up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timeout {
    /// Give up after the duration elapses. A zero duration is a poll.
    After(Duration),
    /// Wait until the condition holds, however long that takes.
    Forever,
}

impl Timeout {
    /// Millisecond value reserved to mean [`Timeout::Forever`].
    pub const FOREVER_MILLIS: u64 = u64::MAX;

    /// Non-blocking poll.
    pub const ZERO: Timeout = Timeout::After(Duration::ZERO);

    /// Build a timeout from milliseconds, honouring [`Self::FOREVER_MILLIS`].
    pub fn from_millis(ms: u64) -> Self {
        if ms == Self::FOREVER_MILLIS {
            Timeout::Forever
        } else {
            Timeout::After(Duration::from_millis(ms))
        }
    }

    /// Milliseconds, with `Forever` mapped back to the sentinel.
    pub fn as_millis(&self) -> u64 {
        match self {
            Timeout::After(d) => u64::try_from(d.as_millis()).unwrap_or(Self::FOREVER_MILLIS - 1),
            Timeout::Forever => Self::FOREVER_MILLIS,
        }
    }

    pub fn is_poll(&self) -> bool {
        matches!(self, Timeout::After(d) if d.is_zero())
    }

    /// Absolute deadline measured from `start`, or `None` for `Forever`.
    ///
    /// Durations too large to represent as an `Instant` are treated as unbounded.
    pub fn deadline_from(&self, start: Instant) -> Option<Instant> {
        match self {
            Timeout::After(d) => start.checked_add(*d),
            Timeout::Forever => None,
        }
    }
}

impl From<Duration> for Timeout {
    fn from(d: Duration) -> Self {
        Timeout::After(d)
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeout::After(d) => write!(f, "{}ms", d.as_millis()),
            Timeout::Forever => write!(f, "forever"),
        }
    }
}

#[cfg(test)]
#[path = "timeout_tests.rs"]
mod tests;
