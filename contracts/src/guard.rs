//! Non-reentrant admission lock.
//!
//! Held for the whole of every state-mutating collection operation, including
//! while the token ledger or the bank runs recipient code. Operations from
//! other threads wait their turn, which gives the single-writer ordering the
//! collection assumes. A re-entry from the *same* thread (a receive hook
//! calling back in) fails with [`StateError::ReentrantCall`] instead of
//! deadlocking.

use std::cell::Cell;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

use crate::error::StateError;

#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    entered: ReentrantMutex<Cell<bool>>,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits one operation. Released when the returned token drops,
    /// including on early return via `?`.
    pub fn enter(&self) -> Result<GuardToken<'_>, StateError> {
        let lock = self.entered.lock();
        if lock.get() {
            return Err(StateError::ReentrantCall);
        }
        lock.set(true);
        Ok(GuardToken { lock })
    }

    /// `true` while an operation is in flight on any thread.
    pub fn is_entered(&self) -> bool {
        match self.entered.try_lock() {
            Some(lock) => lock.get(),
            None => true,
        }
    }
}

#[must_use = "the guard is released as soon as the token is dropped"]
pub struct GuardToken<'a> {
    lock: ReentrantMutexGuard<'a, Cell<bool>>,
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.lock.set(false);
    }
}
