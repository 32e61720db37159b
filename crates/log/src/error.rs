// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the log sink

use std::path::PathBuf;
use strand_sync::SyncError;
use thiserror::Error;

/// Errors from sink setup, draining and shutdown.
///
/// A dropped `write` is not an error; it is reported as `false`.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to open log target {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write log target {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sink is shut down")]
    Closed,
    #[error("sync error: {0}")]
    Sync(#[from] SyncError),
}

/// Errors loading a [`SinkConfig`](crate::SinkConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
