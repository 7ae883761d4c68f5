//! Invariant checks that must hold before an entry is created or updated.

use rust_decimal::Decimal;
use thiserror::Error;

use super::entry::LedgerEntry;

/// The first invariant an entry violates.
///
/// Variants are declared in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntryValidationError {
    /// Description is absent or blank.
    #[error("Provide a valid description.")]
    InvalidDescription,

    /// Month is absent or outside 1..=12.
    #[error("Provide a valid month.")]
    InvalidMonth,

    /// Year is absent.
    #[error("Provide a valid year.")]
    InvalidYear,

    /// No owning account.
    #[error("Provide a valid account.")]
    InvalidAccount,

    /// Value is absent, zero or negative.
    #[error("Provide a valid value.")]
    InvalidValue,

    /// Entry type is absent.
    #[error("Provide a valid entry type.")]
    InvalidType,
}

impl EntryValidationError {
    /// Name of the offending field.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::InvalidDescription => "description",
            Self::InvalidMonth => "month",
            Self::InvalidYear => "year",
            Self::InvalidAccount => "account",
            Self::InvalidValue => "value",
            Self::InvalidType => "type",
        }
    }
}

/// Checks an entry against the ledger invariants.
///
/// Rules run in a fixed order (description, month, year, account, value,
/// type) and the first failure wins, so an entry missing both description
/// and month reports the description.
///
/// # Errors
///
/// Returns the first violated invariant.
pub fn validate_entry(entry: &LedgerEntry) -> Result<(), EntryValidationError> {
    if entry
        .description
        .as_deref()
        .is_none_or(|d| d.trim().is_empty())
    {
        return Err(EntryValidationError::InvalidDescription);
    }

    if !entry.month.is_some_and(|m| (1..=12).contains(&m)) {
        return Err(EntryValidationError::InvalidMonth);
    }

    if entry.year.is_none() {
        return Err(EntryValidationError::InvalidYear);
    }

    if entry.account_id.is_none() {
        return Err(EntryValidationError::InvalidAccount);
    }

    if !entry.value.is_some_and(|v| v > Decimal::ZERO) {
        return Err(EntryValidationError::InvalidValue);
    }

    if entry.entry_type.is_none() {
        return Err(EntryValidationError::InvalidType);
    }

    Ok(())
}
