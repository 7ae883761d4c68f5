//! Balance aggregation over stored entries.
//!
//! Net balance is always `income - expense` for one account. Every stored
//! entry counts, whatever its status.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::AccountId;

use super::entry::EntryType;
use super::error::LedgerError;
use crate::repository::{AccountStore, EntryStore};

/// Per-type totals and the net balance of one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// The account ID.
    pub account_id: AccountId,
    /// Sum of income entries.
    pub income: Decimal,
    /// Sum of expense entries.
    pub expense: Decimal,
    /// `income - expense`.
    pub net: Decimal,
}

impl BalanceSummary {
    /// Builds a summary from the two per-type totals.
    #[must_use]
    pub fn new(account_id: AccountId, income: Decimal, expense: Decimal) -> Self {
        Self {
            account_id,
            income,
            expense,
            net: income - expense,
        }
    }
}

/// Computes balances from the entry store.
#[derive(Debug, Clone)]
pub struct BalanceService<E, A> {
    entries: E,
    accounts: A,
}

impl<E: EntryStore, A: AccountStore> BalanceService<E, A> {
    /// Creates a balance service.
    pub const fn new(entries: E, accounts: A) -> Self {
        Self { entries, accounts }
    }

    /// Sums the values of the account's entries of one type.
    ///
    /// Returns zero when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn balance_by_type_and_account(
        &self,
        account_id: AccountId,
        entry_type: EntryType,
    ) -> Result<Decimal, LedgerError> {
        Ok(self
            .entries
            .sum_value_by_account_and_type(account_id, entry_type)
            .await?)
    }

    /// Income minus expense for an existing account.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountNotFound` if the account does not exist.
    pub async fn net_balance(&self, account_id: AccountId) -> Result<Decimal, LedgerError> {
        Ok(self.summary(account_id).await?.net)
    }

    /// Per-type totals and net balance for an existing account.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountNotFound` if the account does not exist.
    pub async fn summary(&self, account_id: AccountId) -> Result<BalanceSummary, LedgerError> {
        if self.accounts.find_by_id(account_id).await?.is_none() {
            return Err(LedgerError::AccountNotFound(account_id));
        }

        let income = self
            .balance_by_type_and_account(account_id, EntryType::Income)
            .await?;
        let expense = self
            .balance_by_type_and_account(account_id, EntryType::Expense)
            .await?;

        Ok(BalanceSummary::new(account_id, income, expense))
    }
}
