// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! strand-log: buffered, best-effort log sink drained by a background worker
//!
//! Producers append text to an in-memory buffer without ever waiting more
//! than a few milliseconds; a worker thread moves the buffer to a file on a
//! fixed cadence. See [`BufferedSink`].

mod config;
mod error;
mod record;
mod sink;
mod writer;

pub use config::SinkConfig;
pub use error::{ConfigError, SinkError};
pub use record::Record;
pub use sink::{BufferedSink, SinkStats, ERROR_BAR};
pub use writer::SinkWriter;
