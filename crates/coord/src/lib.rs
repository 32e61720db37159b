// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! strand-coord: cooperative lifecycle for a background work loop
//!
//! A [`ThreadCoordinator`] runs a client [`WorkStep`] over and over on its
//! own worker thread until the step asks to finish or a stop is requested,
//! and lets the owner learn when the loop has actually stopped.

mod coordinator;
mod error;
mod phase;
mod step;

pub use coordinator::{RunOutcome, StopOutcome, ThreadCoordinator};
pub use error::CoordError;
pub use phase::Phase;
pub use step::{SimpleStep, WorkStep};
