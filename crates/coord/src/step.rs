// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client work-steps driven by a coordinator

/// One unit of client work, called repeatedly by a
/// [`ThreadCoordinator`](crate::ThreadCoordinator).
///
/// The loop continues only while the step returns `true` **and** leaves
/// `keep_going` set. A step can end the loop either way. `keep_going` is
/// `true` on entry except for the single wind-down call that follows an
/// observed stop request; that call always ends the loop.
pub trait WorkStep {
    fn step(&mut self, keep_going: &mut bool) -> bool;
}

impl<F> WorkStep for F
where
    F: FnMut(&mut bool) -> bool,
{
    fn step(&mut self, keep_going: &mut bool) -> bool {
        self(keep_going)
    }
}

/// Adapts a plain `fn(bool) -> bool` that gets the flag by value and
/// reports whether to continue.
#[derive(Clone, Copy, Debug)]
pub struct SimpleStep(pub fn(bool) -> bool);

impl WorkStep for SimpleStep {
    fn step(&mut self, keep_going: &mut bool) -> bool {
        (self.0)(*keep_going)
    }
}
