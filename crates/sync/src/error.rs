// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the synchronization primitives

use thiserror::Error;

/// Failures that abort the operation that hit them.
///
/// Timeouts are not errors: they come back as `None`, `false` or
/// [`WaitResult::TimedOut`](crate::WaitResult::TimedOut).
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("could not create {what}: {source}")]
    ResourceExhaustion {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{primitive} was abandoned by a holder that panicked")]
    Abandoned { primitive: &'static str },
    #[error("worker thread '{name}' panicked")]
    WorkerPanicked { name: String },
}
