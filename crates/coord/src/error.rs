// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the coordinator

use strand_sync::SyncError;
use thiserror::Error;

/// Errors that abort a coordinator operation
#[derive(Debug, Error)]
pub enum CoordError {
    #[error("sync error: {0}")]
    Sync(#[from] SyncError),
}
