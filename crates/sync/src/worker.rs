// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Native worker thread bound to one entry point

use crate::error::SyncError;
use std::thread::{self, JoinHandle};

/// A named OS thread running `entry(arg)` to completion.
///
/// A `Worker` only exists once its thread has started, so it can never be
/// spawned twice or rebound to a different entry point. Dropping a `Worker`
/// detaches the thread rather than stopping it; owners that need the work
/// finished must synchronize first (for example by waiting on a
/// [`Signal`](crate::Signal) the entry sets on exit) and then [`join`](Self::join).
#[derive(Debug)]
pub struct Worker {
    name: String,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Start a thread named `name` that runs `entry(arg)`.
    pub fn spawn<A, F>(name: impl Into<String>, entry: F, arg: A) -> Result<Self, SyncError>
    where
        A: Send + 'static,
        F: FnOnce(A) + Send + 'static,
    {
        let name = name.into();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || entry(arg))
            .map_err(|source| SyncError::ResourceExhaustion {
                what: "worker thread",
                source,
            })?;

        tracing::debug!(worker = %name, "worker started");
        Ok(Self {
            name,
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the entry point has returned.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the entry point to return.
    pub fn join(mut self) -> Result<(), SyncError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        handle.join().map_err(|_| SyncError::WorkerPanicked {
            name: self.name.clone(),
        })?;
        tracing::debug!(worker = %self.name, "worker joined");
        Ok(())
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            if !handle.is_finished() {
                tracing::warn!(worker = %self.name, "worker dropped while running, detaching");
            }
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
