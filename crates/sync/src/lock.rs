// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exclusive lock with a bounded-wait acquire
//!
//! `std::sync::Mutex` can only block forever or not at all. [`ExclusiveLock`]
//! tracks its owning thread behind a small state mutex and a condvar so an
//! acquire can give up after a caller-chosen [`Timeout`]. The protected value
//! sits in its own `Mutex`, which is only ever touched by the current owner
//! and so never contends.
//!
//! The lock is not reentrant: a thread that already holds it and asks again
//! waits out its own timeout.

use crate::error::SyncError;
use crate::timeout::Timeout;
use std::ops::{Deref, DerefMut};
use std::sync::{Condvar, Mutex, MutexGuard, TryLockError};
use std::thread::{self, ThreadId};
use std::time::Instant;

/// Which thread, if any, currently owns an [`ExclusiveLock`].
#[derive(Debug, Default)]
struct Ownership {
    owner: Mutex<Option<ThreadId>>,
    released: Condvar,
}

impl Ownership {
    /// Take ownership for the calling thread, waiting at most `timeout`.
    fn acquire(&self, timeout: Timeout) -> bool {
        let me = thread::current().id();
        let deadline = timeout.deadline_from(Instant::now());
        let mut owner = self.owner.lock().unwrap_or_else(|e| e.into_inner());

        while owner.is_some() {
            owner = match deadline {
                None => self
                    .released
                    .wait(owner)
                    .unwrap_or_else(|e| e.into_inner()),
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return false;
                    }
                    self.released
                        .wait_timeout(owner, deadline - now)
                        .unwrap_or_else(|e| e.into_inner())
                        .0
                }
            };
        }

        *owner = Some(me);
        true
    }

    /// Give up ownership. Returns `false` if the calling thread is not the owner.
    fn release(&self) -> bool {
        let me = thread::current().id();
        let mut owner = self.owner.lock().unwrap_or_else(|e| e.into_inner());
        if *owner != Some(me) {
            return false;
        }
        *owner = None;
        drop(owner);
        self.released.notify_one();
        true
    }

    fn is_held(&self) -> bool {
        self.owner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

/// Mutual exclusion around a value, with a bounded-wait [`lock`](Self::lock).
///
/// Use `ExclusiveLock<()>` (via [`ExclusiveLock::bare`]) when only the
/// exclusion itself matters.
#[derive(Debug, Default)]
pub struct ExclusiveLock<T> {
    ownership: Ownership,
    value: Mutex<T>,
}

impl ExclusiveLock<()> {
    pub fn bare() -> Self {
        Self::new(())
    }
}

impl<T> ExclusiveLock<T> {
    pub fn new(value: T) -> Self {
        Self {
            ownership: Ownership::default(),
            value: Mutex::new(value),
        }
    }

    /// Acquire the lock, waiting at most `timeout`.
    ///
    /// Returns `Ok(None)` when the timeout elapses first; nothing is held in
    /// that case. Returns [`SyncError::Abandoned`] if a previous holder
    /// panicked while holding the lock; call
    /// [`clear_abandoned`](Self::clear_abandoned) once the value is known to
    /// be consistent again.
    pub fn lock(&self, timeout: Timeout) -> Result<Option<ScopedLock<'_, T>>, SyncError> {
        if !self.ownership.acquire(timeout) {
            return Ok(None);
        }

        let token = OwnerToken {
            ownership: &self.ownership,
            armed: true,
        };

        // Only the owner reaches this point, so the value mutex is free.
        let guard = match self.value.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(_)) => {
                tracing::warn!("exclusive lock abandoned by a panicking holder");
                return Err(SyncError::Abandoned {
                    primitive: "exclusive lock",
                });
            }
            Err(TryLockError::WouldBlock) => self.value.lock().map_err(|_| {
                SyncError::Abandoned {
                    primitive: "exclusive lock",
                }
            })?,
        };

        Ok(Some(ScopedLock { guard, token }))
    }

    /// Non-blocking attempt; same as `lock(Timeout::ZERO)`.
    pub fn try_lock(&self) -> Result<Option<ScopedLock<'_, T>>, SyncError> {
        self.lock(Timeout::ZERO)
    }

    /// Snapshot of whether some thread holds the lock. Advisory only.
    pub fn is_locked(&self) -> bool {
        self.ownership.is_held()
    }

    pub fn is_abandoned(&self) -> bool {
        self.value.is_poisoned()
    }

    /// Accept the value as-is after an abandonment so the lock can be used again.
    pub fn clear_abandoned(&self) {
        self.value.clear_poison();
    }

    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut().unwrap_or_else(|e| e.into_inner())
    }

    pub fn into_inner(self) -> T {
        self.value.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

/// Releases ownership on drop unless disarmed by an explicit unlock.
#[derive(Debug)]
struct OwnerToken<'a> {
    ownership: &'a Ownership,
    armed: bool,
}

impl OwnerToken<'_> {
    fn release(mut self) -> bool {
        self.armed = false;
        self.ownership.release()
    }
}

impl Drop for OwnerToken<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.ownership.release();
        }
    }
}

/// Held [`ExclusiveLock`]; the lock is released when this goes out of scope.
///
/// Like `MutexGuard` this cannot be sent to another thread, so the thread
/// that released it is always the thread that acquired it.
#[derive(Debug)]
pub struct ScopedLock<'a, T> {
    // Field order matters: the value guard drops before ownership is released.
    guard: MutexGuard<'a, T>,
    token: OwnerToken<'a>,
}

impl<T> ScopedLock<'_, T> {
    /// Release early. Returns `false` if the calling thread did not hold the lock.
    pub fn unlock(self) -> bool {
        let ScopedLock { guard, token } = self;
        drop(guard);
        token.release()
    }
}

impl<T> Deref for ScopedLock<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for ScopedLock<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
