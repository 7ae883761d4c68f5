//! Ledger service: the lifecycle of entries.
//!
//! Every create and update passes the invariant checks before reaching the
//! store. Update and delete require an entry that has already been stored.

use tally_shared::types::EntryId;

use super::entry::{EntryStatus, LedgerEntry};
use super::error::LedgerError;
use super::filter::EntryFilter;
use super::validation::validate_entry;
use crate::repository::EntryStore;

/// Ledger service for entry lifecycle operations.
#[derive(Debug, Clone)]
pub struct LedgerService<S> {
    store: S,
}

impl<S: EntryStore> LedgerService<S> {
    /// Creates a ledger service over an entry store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and stores a new entry.
    ///
    /// An entry without a status is stored as `Pending`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` if an invariant fails; the store is
    /// not touched in that case.
    pub async fn save(&self, mut entry: LedgerEntry) -> Result<LedgerEntry, LedgerError> {
        validate_entry(&entry)?;
        entry.status.get_or_insert(EntryStatus::Pending);
        Ok(self.store.save(entry).await?)
    }

    /// Validates and replaces a stored entry.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotPersisted` if the entry has no ID, and
    /// `LedgerError::Validation` if an invariant fails.
    pub async fn update(&self, entry: LedgerEntry) -> Result<LedgerEntry, LedgerError> {
        if entry.id.is_none() {
            return Err(LedgerError::NotPersisted { operation: "update" });
        }
        validate_entry(&entry)?;
        Ok(self.store.update(entry).await?)
    }

    /// Removes a stored entry.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotPersisted` if the entry has no ID.
    pub async fn delete(&self, entry: &LedgerEntry) -> Result<(), LedgerError> {
        let id = entry
            .id
            .ok_or(LedgerError::NotPersisted { operation: "delete" })?;
        Ok(self.store.delete(id).await?)
    }

    /// Sets the entry's status and stores it through [`Self::update`].
    ///
    /// The in-memory entry keeps the new status even if the update fails.
    /// No transition is forbidden.
    ///
    /// # Errors
    ///
    /// Propagates every error from `update`.
    pub async fn update_status(
        &self,
        entry: &mut LedgerEntry,
        status: EntryStatus,
    ) -> Result<LedgerEntry, LedgerError> {
        entry.status = Some(status);
        self.update(entry.clone()).await
    }

    /// Looks an entry up by ID and changes its status.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if no entry has this ID.
    pub async fn update_status_by_id(
        &self,
        id: EntryId,
        status: EntryStatus,
    ) -> Result<LedgerEntry, LedgerError> {
        let mut entry = self
            .find_by_id(id)
            .await?
            .ok_or(LedgerError::NotFound(id))?;
        self.update_status(&mut entry, status).await
    }

    /// Finds an entry by ID. Absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn find_by_id(&self, id: EntryId) -> Result<Option<LedgerEntry>, LedgerError> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Returns the entries matching the present fields of `example`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn search(&self, example: &LedgerEntry) -> Result<Vec<LedgerEntry>, LedgerError> {
        let filter = EntryFilter::from_example(example);
        Ok(self.store.find_by_example(&filter).await?)
    }
}
