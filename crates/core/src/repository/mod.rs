//! Persistence ports required by the core services.
//!
//! The core never talks to a database directly. Services receive an
//! implementation of these traits at construction time; `tally-db` provides
//! the PostgreSQL one and [`memory::InMemoryStore`] an in-process one.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tally_shared::types::{AccountId, EntryId};
use thiserror::Error;

use crate::account::Account;
use crate::ledger::{EntryFilter, EntryType, LedgerEntry};

/// Failures reported by a persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The record addressed by an update does not exist.
    #[error("Record not found: {0}")]
    MissingRecord(String),

    /// A uniqueness constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other backend failure.
    #[error("Storage error: {0}")]
    Backend(String),
}

/// Decimal places every store keeps for entry values.
pub const VALUE_SCALE: u32 = 2;

/// Rejects an entry whose value cannot be stored without rounding.
///
/// # Errors
///
/// Returns `StoreError::Backend` when the value has more than
/// [`VALUE_SCALE`] significant decimal places.
pub fn ensure_storable_value(entry: &LedgerEntry) -> Result<(), StoreError> {
    match entry.value {
        Some(value) if value.normalize().scale() > VALUE_SCALE => Err(StoreError::Backend(
            format!("value {value} has more than {VALUE_SCALE} decimal places"),
        )),
        _ => Ok(()),
    }
}

/// Storage for accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Stores a new account and returns it with an assigned ID.
    async fn save(&self, account: Account) -> Result<Account, StoreError>;

    /// Finds the account registered under `email`.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Returns true if any account is registered under `email`.
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Finds an account by ID.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError>;
}

/// Storage for ledger entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Stores a new entry and returns it with an assigned ID.
    async fn save(&self, entry: LedgerEntry) -> Result<LedgerEntry, StoreError>;

    /// Replaces a stored entry wholesale.
    async fn update(&self, entry: LedgerEntry) -> Result<LedgerEntry, StoreError>;

    /// Removes the entry with this ID.
    async fn delete(&self, id: EntryId) -> Result<(), StoreError>;

    /// Finds an entry by ID.
    async fn find_by_id(&self, id: EntryId) -> Result<Option<LedgerEntry>, StoreError>;

    /// Returns every entry the filter matches.
    async fn find_by_example(&self, filter: &EntryFilter) -> Result<Vec<LedgerEntry>, StoreError>;

    /// Sums `value` over the account's entries of one type; zero when none match.
    async fn sum_value_by_account_and_type(
        &self,
        account_id: AccountId,
        entry_type: EntryType,
    ) -> Result<Decimal, StoreError>;
}

#[async_trait]
impl<T: AccountStore + ?Sized> AccountStore for Arc<T> {
    async fn save(&self, account: Account) -> Result<Account, StoreError> {
        (**self).save(account).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        (**self).find_by_email(email).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        (**self).exists_by_email(email).await
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        (**self).find_by_id(id).await
    }
}

#[async_trait]
impl<T: EntryStore + ?Sized> EntryStore for Arc<T> {
    async fn save(&self, entry: LedgerEntry) -> Result<LedgerEntry, StoreError> {
        (**self).save(entry).await
    }

    async fn update(&self, entry: LedgerEntry) -> Result<LedgerEntry, StoreError> {
        (**self).update(entry).await
    }

    async fn delete(&self, id: EntryId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }

    async fn find_by_id(&self, id: EntryId) -> Result<Option<LedgerEntry>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_by_example(&self, filter: &EntryFilter) -> Result<Vec<LedgerEntry>, StoreError> {
        (**self).find_by_example(filter).await
    }

    async fn sum_value_by_account_and_type(
        &self,
        account_id: AccountId,
        entry_type: EntryType,
    ) -> Result<Decimal, StoreError> {
        (**self)
            .sum_value_by_account_and_type(account_id, entry_type)
            .await
    }
}
