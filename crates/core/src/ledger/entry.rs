//! Ledger entry domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, EntryId};

/// Classification of an entry for balance aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl EntryType {
    /// Returns the canonical storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            other => Err(format!("unknown entry type: {other}")),
        }
    }
}

/// Lifecycle marker of an entry.
///
/// Any status may follow any other; there is no transition guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    /// Recorded but not yet settled.
    #[default]
    Pending,
    /// Money actually moved.
    Settled,
    /// Entry voided by the owner.
    Cancelled,
}

impl EntryStatus {
    /// Returns the canonical storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Settled => "SETTLED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "SETTLED" => Ok(Self::Settled),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(format!("unknown entry status: {other}")),
        }
    }
}

/// A single recorded income or expense for one account in a given month/year.
///
/// Fields are optional because an entry is assembled incrementally by callers
/// and only checked by [`validate_entry`](super::validate_entry) before it is
/// stored. The same shape doubles as a search template, where every `Some`
/// field becomes a filter criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Assigned by the store on first save; `None` until then.
    pub id: Option<EntryId>,
    /// Free-text description; must not be blank.
    pub description: Option<String>,
    /// Calendar month, 1 through 12.
    pub month: Option<u32>,
    /// Calendar year.
    pub year: Option<i32>,
    /// Owning account (foreign key, the account is not copied).
    pub account_id: Option<AccountId>,
    /// Strictly positive amount.
    pub value: Option<Decimal>,
    /// Income or expense.
    #[serde(rename = "type")]
    pub entry_type: Option<EntryType>,
    /// Lifecycle status; saving an entry without one marks it pending.
    pub status: Option<EntryStatus>,
    /// Date the store first recorded the entry.
    pub registered_on: Option<NaiveDate>,
}

impl LedgerEntry {
    /// Creates an empty entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the month.
    #[must_use]
    pub const fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    /// Sets the year.
    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the owning account.
    #[must_use]
    pub const fn with_account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Sets the value.
    #[must_use]
    pub const fn with_value(mut self, value: Decimal) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the entry type.
    #[must_use]
    pub const fn with_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = Some(entry_type);
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true once the entry has been stored.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_entry_is_empty_and_unsaved() {
        let entry = LedgerEntry::new();
        assert!(!entry.is_persisted());
        assert!(entry.status.is_none());
        assert!(entry.description.is_none());
    }

    #[test]
    fn test_builder_sets_fields() {
        let account = AccountId::generate();
        let entry = LedgerEntry::new()
            .with_description("Groceries")
            .with_month(3)
            .with_year(2024)
            .with_account(account)
            .with_value(dec!(42.50))
            .with_type(EntryType::Expense)
            .with_status(EntryStatus::Settled);

        assert_eq!(entry.description.as_deref(), Some("Groceries"));
        assert_eq!(entry.month, Some(3));
        assert_eq!(entry.year, Some(2024));
        assert_eq!(entry.account_id, Some(account));
        assert_eq!(entry.value, Some(dec!(42.50)));
        assert_eq!(entry.entry_type, Some(EntryType::Expense));
        assert_eq!(entry.status, Some(EntryStatus::Settled));
    }

    #[test]
    fn test_type_and_status_round_trip_names() {
        for t in [EntryType::Income, EntryType::Expense] {
            assert_eq!(t.as_str().parse::<EntryType>().unwrap(), t);
        }
        for s in [EntryStatus::Pending, EntryStatus::Settled, EntryStatus::Cancelled] {
            assert_eq!(s.to_string().parse::<EntryStatus>().unwrap(), s);
        }
        assert_eq!("settled".parse::<EntryStatus>().unwrap(), EntryStatus::Settled);
        assert!("REFUNDED".parse::<EntryStatus>().is_err());
    }

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(EntryStatus::default(), EntryStatus::Pending);
    }
}
