//! Shared application state.
//!
//! One [`App`] value owns everything a handler touches: the item registry
//! and the photo store. It is constructed in `main` (or by a test) and
//! passed to handlers explicitly. There is no module-level singleton, so
//! every test gets its own isolated instance.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::photos::PhotoStore;
use crate::registry::Registry;

/// The service's shared state: the registry behind one mutex, plus the
/// photo store.
///
/// Every registry operation runs as a single short critical section, which
/// serializes access without ever holding the lock across an await. Photo
/// file I/O always happens outside the lock.
pub struct App {
    registry: Mutex<Registry>,
    pub(crate) photos: PhotoStore,
}

impl App {
    pub fn new(photos: PhotoStore) -> Self {
        Self { registry: Mutex::new(Registry::new()), photos }
    }

    /// Locks the registry for one operation.
    ///
    /// A poisoned lock is recovered rather than propagated; no registry
    /// operation leaves the sequence half-applied on panic.
    pub(crate) fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
