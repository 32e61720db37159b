// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! strand-sync: blocking synchronization primitives with bounded waits
//!
//! This crate provides:
//! - **ExclusiveLock** / **ScopedLock** - mutual exclusion with a bounded-wait acquire
//! - **Signal** - manual-reset, level-triggered event
//! - **Worker** - a named OS thread bound to one entry point and one argument
//! - **Timeout** - millisecond timeouts with a "wait forever" sentinel

mod error;
pub mod lock;
pub mod signal;
pub mod timeout;
pub mod worker;

pub use error::SyncError;
pub use lock::{ExclusiveLock, ScopedLock};
pub use signal::{Signal, WaitResult};
pub use timeout::Timeout;
pub use worker::Worker;
