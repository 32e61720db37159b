// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tracing-subscriber` writer backed by a [`BufferedSink`]

use crate::sink::BufferedSink;
use std::cell::Cell;
use std::io;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

thread_local! {
    static IN_SINK: Cell<bool> = const { Cell::new(false) };
}

/// Routes formatted events into a shared sink.
///
/// ```ignore
/// let sink = Arc::new(BufferedSink::open(path, SinkConfig::default())?);
/// tracing_subscriber::fmt().with_writer(SinkWriter::new(Arc::clone(&sink))).init();
/// ```
///
/// Each `write` call becomes one sink chunk, and the fmt layer writes each
/// event with a single call. Chunks the sink drops are reported as written.
#[derive(Clone, Debug)]
pub struct SinkWriter {
    sink: Arc<BufferedSink>,
}

impl SinkWriter {
    pub fn new(sink: Arc<BufferedSink>) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &Arc<BufferedSink> {
        &self.sink
    }
}

impl io::Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Events raised from inside the sink on this thread are discarded.
        if IN_SINK.with(|flag| flag.replace(true)) {
            return Ok(buf.len());
        }
        self.sink.write(&String::from_utf8_lossy(buf));
        IN_SINK.with(|flag| flag.set(false));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SinkWriter {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
