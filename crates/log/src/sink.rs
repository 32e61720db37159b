// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Buffered log sink
//!
//! Producers append whole chunks to an in-memory buffer guarded by an
//! [`ExclusiveLock`], waiting at most `write_timeout`. A drain worker moves
//! the buffer to the target file every `drain_interval`. Lock order is
//! target then buffer; producers only ever take the buffer.

use crate::config::SinkConfig;
use crate::error::SinkError;
use crate::record::Record;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use strand_sync::{ExclusiveLock, ScopedLock, Signal, Timeout, Worker};

/// Bar framing [`BufferedSink::print_error`] output
pub const ERROR_BAR: &str = "=================================================";

/// Snapshot of sink counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SinkStats {
    /// Chunks that made it into the buffer
    pub accepted_writes: u64,
    pub accepted_bytes: u64,
    /// Chunks discarded because the buffer stayed busy or the sink was closed
    pub dropped_writes: u64,
    /// Bytes written to a target file
    pub drained_bytes: u64,
    /// Drains that failed with an I/O error; their text is lost
    pub write_errors: u64,
}

#[derive(Debug)]
struct Target {
    path: PathBuf,
    file: File,
}

impl Target {
    fn open(path: &Path, append: bool) -> Result<Self, SinkError> {
        let mut options = OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        let file = options.open(path).map_err(|source| SinkError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    fn put(&mut self, text: &str) -> Result<(), SinkError> {
        self.file
            .write_all(text.as_bytes())
            .and_then(|()| self.file.flush())
            .map_err(|source| SinkError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

#[derive(Debug, Default)]
struct Counters {
    accepted_writes: AtomicU64,
    accepted_bytes: AtomicU64,
    dropped_writes: AtomicU64,
    drained_bytes: AtomicU64,
    write_errors: AtomicU64,
}

#[derive(Debug)]
struct SinkShared {
    config: SinkConfig,
    buffer: ExclusiveLock<String>,
    target: Mutex<Option<Target>>,
    active: AtomicBool,
    closed: AtomicBool,
    wake: Signal,
    exited: Signal,
    counters: Counters,
}

impl SinkShared {
    fn lock_buffer(&self, timeout: Timeout) -> Option<ScopedLock<'_, String>> {
        match self.buffer.lock(timeout) {
            Ok(held) => held,
            Err(err) => {
                // Clear first: the warning below may itself be routed into this sink.
                self.buffer.clear_abandoned();
                tracing::warn!(error = %err, "log buffer recovered after abandonment");
                self.buffer.lock(timeout).ok().flatten()
            }
        }
    }

    fn push(&self, chunk: &str) -> bool {
        if self.closed.load(Ordering::Acquire) {
            self.counters.dropped_writes.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        let Some(mut buffer) = self.lock_buffer(Timeout::from(self.config.write_timeout)) else {
            self.counters.dropped_writes.fetch_add(1, Ordering::Relaxed);
            return false;
        };
        // Shutdown flags `closed` before its final drain takes the buffer, so a
        // chunk appended after this check is always drained.
        if self.closed.load(Ordering::Acquire) {
            drop(buffer);
            self.counters.dropped_writes.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        buffer.push_str(chunk);
        drop(buffer);

        self.counters.accepted_writes.fetch_add(1, Ordering::Relaxed);
        self.counters
            .accepted_bytes
            .fetch_add(chunk.len() as u64, Ordering::Relaxed);
        true
    }

    /// Move pending text into the current target. Text stays buffered while
    /// no target is set.
    fn drain(&self) -> Result<usize, SinkError> {
        let mut target = self.target.lock().unwrap_or_else(|e| e.into_inner());
        let Some(target) = target.as_mut() else {
            return Ok(0);
        };

        let text = match self.lock_buffer(Timeout::Forever) {
            Some(mut buffer) => std::mem::take(&mut *buffer),
            None => return Ok(0),
        };
        if text.is_empty() {
            return Ok(0);
        }

        match target.put(&text) {
            Ok(()) => {
                self.counters
                    .drained_bytes
                    .fetch_add(text.len() as u64, Ordering::Relaxed);
                Ok(text.len())
            }
            Err(err) => {
                self.counters.write_errors.fetch_add(1, Ordering::Relaxed);
                Err(err)
            }
        }
    }
}

fn drain_loop(shared: Arc<SinkShared>) {
    tracing::debug!(interval = ?shared.config.drain_interval, "log drain started");
    while shared.active.load(Ordering::Acquire) {
        if let Err(err) = shared.drain() {
            tracing::warn!(error = %err, "log drain failed, text discarded");
        }
        shared
            .wake
            .wait(Timeout::from(shared.config.drain_interval));
    }
    tracing::debug!("log drain exiting");
    shared.exited.set();
}

/// Best-effort buffered log sink.
///
/// Construct one, share it behind an `Arc`, and call
/// [`set_target`](Self::set_target) to start draining. Text written before a
/// target exists is kept and lands in the first target. Dropping the sink
/// runs [`shutdown`](Self::shutdown).
#[derive(Debug)]
pub struct BufferedSink {
    shared: Arc<SinkShared>,
    worker: Mutex<Option<Worker>>,
}

impl Default for BufferedSink {
    fn default() -> Self {
        Self::new(SinkConfig::default())
    }
}

impl BufferedSink {
    pub fn new(config: SinkConfig) -> Self {
        Self {
            shared: Arc::new(SinkShared {
                config,
                buffer: ExclusiveLock::new(String::new()),
                target: Mutex::new(None),
                active: AtomicBool::new(true),
                closed: AtomicBool::new(false),
                wake: Signal::new(),
                exited: Signal::new(),
                counters: Counters::default(),
            }),
            worker: Mutex::new(None),
        }
    }

    /// Create a sink already draining into `path`.
    pub fn open(path: impl AsRef<Path>, config: SinkConfig) -> Result<Self, SinkError> {
        let sink = Self::new(config);
        sink.set_target(path)?;
        Ok(sink)
    }

    pub fn config(&self) -> &SinkConfig {
        &self.shared.config
    }

    /// Direct output to `path`.
    ///
    /// The file is truncated unless the config asks for append mode. Text
    /// buffered before the switch goes to the previous target, if any. The
    /// drain worker starts on the first call only.
    pub fn set_target(&self, path: impl AsRef<Path>) -> Result<(), SinkError> {
        let path = path.as_ref();
        let mut worker = self.worker.lock().unwrap_or_else(|e| e.into_inner());
        if self.shared.closed.load(Ordering::Acquire) {
            return Err(SinkError::Closed);
        }

        let opened = Target::open(path, self.shared.config.append)?;
        if let Err(err) = self.shared.drain() {
            tracing::warn!(error = %err, "failed to drain into previous log target");
        }
        let previous = self
            .shared
            .target
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(opened);
        if let Some(previous) = previous {
            tracing::info!(from = %previous.path.display(), to = %path.display(), "log target changed");
        }

        if worker.is_none() {
            let spawned = Worker::spawn("strand-log-drain", drain_loop, Arc::clone(&self.shared))?;
            *worker = Some(spawned);
            tracing::info!(path = %path.display(), "log sink started");
        }
        Ok(())
    }

    /// Append `chunk` as one unit.
    ///
    /// Waits at most `write_timeout` for the buffer. Returns `false` and
    /// drops the chunk when that expires or the sink is shut down.
    pub fn write(&self, chunk: &str) -> bool {
        self.shared.push(chunk)
    }

    /// Start a [`Record`] that is written as a single chunk.
    pub fn record(&self) -> Record<'_> {
        Record::new(self)
    }

    /// Write `msg` framed by [`ERROR_BAR`] lines, as one chunk.
    pub fn print_error(&self, msg: &str) -> bool {
        let chunk = format!("!{ERROR_BAR}\n{msg}\n{ERROR_BAR}!\n");
        self.write(&chunk)
    }

    /// Drain now instead of waiting for the worker.
    pub fn flush(&self) -> Result<(), SinkError> {
        self.shared.drain().map(|_| ())
    }

    pub fn stats(&self) -> SinkStats {
        let c = &self.shared.counters;
        SinkStats {
            accepted_writes: c.accepted_writes.load(Ordering::Relaxed),
            accepted_bytes: c.accepted_bytes.load(Ordering::Relaxed),
            dropped_writes: c.dropped_writes.load(Ordering::Relaxed),
            drained_bytes: c.drained_bytes.load(Ordering::Relaxed),
            write_errors: c.write_errors.load(Ordering::Relaxed),
        }
    }

    /// Hold the buffer lock, as a producer stuck mid-write would.
    #[cfg(test)]
    pub(crate) fn hold_buffer(&self) -> ScopedLock<'_, String> {
        self.shared.buffer.lock(Timeout::Forever).unwrap().unwrap()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::Acquire)
    }

    /// Stop the drain worker, write out everything still buffered, and
    /// close the target. Later writes are dropped. Safe to call again.
    pub fn shutdown(&self) -> Result<(), SinkError> {
        let mut slot = self.worker.lock().unwrap_or_else(|e| e.into_inner());
        if self.shared.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.shared.active.store(false, Ordering::Release);
        self.shared.wake.set();

        let mut joined = Ok(());
        if let Some(worker) = slot.take() {
            let grace = self.shared.config.shutdown_grace;
            if self.shared.exited.wait(Timeout::from(grace)).is_signaled() {
                joined = worker.join().map_err(SinkError::from);
            } else {
                tracing::warn!(grace = ?grace, "log drain did not exit in time");
                drop(worker);
            }
        }

        let drained = self.shared.drain();
        let closed = self
            .shared
            .target
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(target) = closed {
            tracing::debug!(path = %target.path.display(), "log target closed");
        }

        joined?;
        drained.map(|_| ())
    }
}

impl Drop for BufferedSink {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            tracing::warn!(error = %err, "log sink shutdown failed");
        }
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
