//! The catalog store and its exclusive section.
//!
//! [`CatalogStore::exclusive`] is the single serialization point for every
//! stock mutation and for resets. The guard is a plain `std::sync::Mutex`
//! guard: hold it only across synchronous work, never across an `.await`.

use std::sync::{Mutex, MutexGuard};

use loadmart_core::error::DomainError;
use tracing::warn;

use crate::domain::catalog::Catalog;
use crate::domain::reservation::{Reservation, RollbackPolicy};

/// Shared owner of the current catalog.
#[derive(Debug)]
pub struct CatalogStore {
    catalog: Mutex<Catalog>,
}

impl CatalogStore {
    /// Wraps an initial catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Mutex::new(catalog),
        }
    }

    /// Enters the exclusive section.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Internal` if a previous holder panicked.
    pub fn exclusive(&self) -> Result<MutexGuard<'_, Catalog>, DomainError> {
        self.catalog
            .lock()
            .map_err(|_| DomainError::poisoned("catalog"))
    }

    /// Runs a read-only closure against the current catalog.
    ///
    /// The section is held only while `read` runs, so callers should copy
    /// out what they need rather than compute at length.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Internal` if the lock is poisoned.
    pub fn read<R>(&self, read: impl FnOnce(&Catalog) -> R) -> Result<R, DomainError> {
        let catalog = self.exclusive()?;
        Ok(read(&catalog))
    }

    /// Re-enters the exclusive section and returns a reservation's stock.
    ///
    /// Returns `Ok(false)` when the reservation predates a reset.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Internal` if the lock is poisoned.
    pub fn release(
        &self,
        reservation: Reservation,
        policy: RollbackPolicy,
    ) -> Result<bool, DomainError> {
        let mut catalog = self.exclusive()?;
        let released = catalog.release(reservation, policy);
        if !released {
            warn!(
                generation = catalog.generation(),
                "discarded reservation from a superseded catalog"
            );
        }
        Ok(released)
    }
}
