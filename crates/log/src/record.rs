// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record: compose a log entry, then write it as one chunk

use crate::sink::BufferedSink;
use std::fmt;

/// Pending text for a [`BufferedSink`].
///
/// Pieces are appended locally and reach the sink only on commit, so a
/// record never interleaves with other writers. Anything still pending when
/// the record is dropped gets one final commit attempt.
///
/// ```
/// # use strand_log::{BufferedSink, SinkConfig};
/// let sink = BufferedSink::new(SinkConfig::default());
/// sink.record().append("tick ").append(3).field("phase", "running").line();
/// ```
pub struct Record<'a> {
    sink: &'a BufferedSink,
    pending: String,
}

impl<'a> Record<'a> {
    pub(crate) fn new(sink: &'a BufferedSink) -> Self {
        Self {
            sink,
            pending: String::new(),
        }
    }

    pub fn append(&mut self, value: impl fmt::Display) -> &mut Self {
        self.pending.push_str(&value.to_string());
        self
    }

    /// Append ` key=value`, without the leading space at the start of a line.
    pub fn field(&mut self, key: &str, value: impl fmt::Display) -> &mut Self {
        if !self.pending.is_empty() && !self.pending.ends_with(['\n', ' ']) {
            self.pending.push(' ');
        }
        self.pending.push_str(key);
        self.pending.push('=');
        self.pending.push_str(&value.to_string());
        self
    }

    /// End the line and try to commit; pending text is kept if the sink is busy.
    pub fn line(&mut self) -> bool {
        self.pending.push('\n');
        self.try_commit()
    }

    /// Try to hand the pending text to the sink.
    ///
    /// On success the record is empty again. On failure the text is kept so a
    /// later commit can retry.
    pub fn try_commit(&mut self) -> bool {
        if self.pending.is_empty() {
            return true;
        }
        if self.sink.write(&self.pending) {
            self.pending.clear();
            true
        } else {
            false
        }
    }

    /// Commit once and discard whatever did not make it.
    pub fn commit(mut self) -> bool {
        let written = self.try_commit();
        self.pending.clear();
        written
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }
}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("pending", &self.pending)
            .finish()
    }
}

impl Drop for Record<'_> {
    fn drop(&mut self) {
        self.try_commit();
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
