//! Single-writer coordination.
//!
//! Every mutating diamond call runs while holding the [`WriterLock`]. Callers
//! on other threads wait their turn; a call issued from the thread that
//! already holds the lock (facet code or an initializer calling back into the
//! diamond) is rejected instead of deadlocking.
//!
//! Re-entry is recognised by thread identity only. Facet code that hands a
//! nested mutation to another thread and then waits for it would block
//! forever under [`WriterLock::enter`]; such code must use
//! [`WriterLock::try_enter`] (exposed as `Diamond::try_diamond_cut`), which
//! fails with [`GuardError::Busy`] instead of waiting.

use crate::ThisError;
use std::{
    sync::{Mutex, MutexGuard, PoisonError, TryLockError},
    thread::{self, ThreadId},
};

///
/// GuardError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum GuardError {
    #[error("diamond mutation already in progress on another thread")]
    Busy,

    #[error("diamond mutation re-entered while another mutation is in progress")]
    Reentrant,
}

///
/// WriterLock
///

#[derive(Debug, Default)]
pub struct WriterLock {
    lock: Mutex<()>,
    holder: Mutex<Option<ThreadId>>,
}

impl WriterLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the writer slot, failing fast on same-thread re-entry.
    pub fn enter(&self) -> Result<WriterGuard<'_>, GuardError> {
        let me = thread::current().id();

        if *self.holder() == Some(me) {
            return Err(GuardError::Reentrant);
        }

        let inner = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        *self.holder() = Some(me);

        Ok(WriterGuard { owner: self, _inner: inner })
    }

    /// Acquire the writer slot without waiting. Fails with `Busy` while any
    /// other thread holds it.
    pub fn try_enter(&self) -> Result<WriterGuard<'_>, GuardError> {
        let me = thread::current().id();

        if *self.holder() == Some(me) {
            return Err(GuardError::Reentrant);
        }

        let inner = match self.lock.try_lock() {
            Ok(inner) => inner,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return Err(GuardError::Busy),
        };
        *self.holder() = Some(me);

        Ok(WriterGuard { owner: self, _inner: inner })
    }

    /// True while any thread holds the writer slot.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.holder().is_some()
    }

    fn holder(&self) -> MutexGuard<'_, Option<ThreadId>> {
        self.holder.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

///
/// WriterGuard
///

pub struct WriterGuard<'a> {
    owner: &'a WriterLock,
    _inner: MutexGuard<'a, ()>,
}

impl Drop for WriterGuard<'_> {
    fn drop(&mut self) {
        *self.owner.holder() = None;
    }
}

///
/// TESTS
///
