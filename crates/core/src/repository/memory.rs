//! In-process store backed by concurrent hash maps.
//!
//! Useful for embedding the ledger without a database and for exercising the
//! services end to end in tests. Writes are last-write-wins, the same as the
//! SQL store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tally_shared::types::{AccountId, EntryId};

use super::{AccountStore, EntryStore, StoreError, ensure_storable_value};
use crate::account::Account;
use crate::ledger::{EntryFilter, EntryType, LedgerEntry};

/// Accounts and entries held in memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    accounts: DashMap<AccountId, Account>,
    entries: DashMap<EntryId, LedgerEntry>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Rejects entries that reference an account this store does not hold.
    fn ensure_owner(&self, entry: &LedgerEntry) -> Result<(), StoreError> {
        match entry.account_id {
            Some(account_id) if !self.accounts.contains_key(&account_id) => {
                Err(StoreError::MissingRecord(format!("account {account_id}")))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn save(&self, mut account: Account) -> Result<Account, StoreError> {
        if self.accounts.iter().any(|a| a.email == account.email) {
            return Err(StoreError::Conflict(format!(
                "email already registered: {}",
                account.email
            )));
        }

        let id = AccountId::generate();
        account.id = Some(id);
        self.accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.email == email)
            .map(|a| a.value().clone()))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.accounts.iter().any(|a| a.email == email))
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(&id).map(|a| a.value().clone()))
    }
}

#[async_trait]
impl EntryStore for InMemoryStore {
    async fn save(&self, mut entry: LedgerEntry) -> Result<LedgerEntry, StoreError> {
        self.ensure_owner(&entry)?;
        ensure_storable_value(&entry)?;

        let id = EntryId::generate();
        entry.id = Some(id);
        entry.registered_on = Some(Utc::now().date_naive());
        self.entries.insert(id, entry.clone());
        Ok(entry)
    }

    async fn update(&self, mut entry: LedgerEntry) -> Result<LedgerEntry, StoreError> {
        let id = entry
            .id
            .ok_or_else(|| StoreError::MissingRecord("entry without id".to_string()))?;
        self.ensure_owner(&entry)?;
        ensure_storable_value(&entry)?;
        let mut slot = self
            .entries
            .get_mut(&id)
            .ok_or_else(|| StoreError::MissingRecord(id.to_string()))?;

        entry.registered_on = slot.registered_on;
        *slot = entry.clone();
        Ok(entry)
    }

    async fn delete(&self, id: EntryId) -> Result<(), StoreError> {
        self.entries.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: EntryId) -> Result<Option<LedgerEntry>, StoreError> {
        Ok(self.entries.get(&id).map(|e| e.value().clone()))
    }

    async fn find_by_example(&self, filter: &EntryFilter) -> Result<Vec<LedgerEntry>, StoreError> {
        let mut found: Vec<LedgerEntry> = self
            .entries
            .iter()
            .filter(|e| filter.matches(e.value()))
            .map(|e| e.value().clone())
            .collect();
        // v7 IDs are time-ordered, so this is insertion order
        found.sort_by_key(|e| e.id);
        Ok(found)
    }

    async fn sum_value_by_account_and_type(
        &self,
        account_id: AccountId,
        entry_type: EntryType,
    ) -> Result<Decimal, StoreError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.account_id == Some(account_id) && e.entry_type == Some(entry_type))
            .filter_map(|e| e.value)
            .sum())
    }
}
