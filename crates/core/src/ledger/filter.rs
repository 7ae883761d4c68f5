//! Query-by-example filter for ledger entries.
//!
//! A filter is built from the `Some` fields of a template entry. Stores either
//! evaluate it directly with [`EntryFilter::matches`] or translate each
//! criterion into their own query language.

use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, EntryId};

use super::entry::{EntryStatus, EntryType, LedgerEntry};

/// Conjunction of optional criteria over ledger entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFilter {
    /// Exact entry ID.
    pub id: Option<EntryId>,
    /// Case-insensitive substring of the description.
    pub description: Option<String>,
    /// Exact month.
    pub month: Option<u32>,
    /// Exact year.
    pub year: Option<i32>,
    /// Owning account.
    pub account_id: Option<AccountId>,
    /// Entry type.
    pub entry_type: Option<EntryType>,
    /// Lifecycle status.
    pub status: Option<EntryStatus>,
}

impl EntryFilter {
    /// Creates a new empty filter (matches everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a filter from the present fields of `example`.
    ///
    /// `value` and `registered_on` are not search criteria. A blank
    /// description is ignored rather than matching everything twice.
    #[must_use]
    pub fn from_example(example: &LedgerEntry) -> Self {
        Self {
            id: example.id,
            description: example
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_lowercase),
            month: example.month,
            year: example.year,
            account_id: example.account_id,
            entry_type: example.entry_type,
            status: example.status,
        }
    }

    /// Restricts the filter to one account.
    #[must_use]
    pub const fn for_account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Returns true if the filter is empty (matches everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true if `entry` satisfies every criterion.
    ///
    /// A criterion on a field the entry lacks never matches.
    #[must_use]
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        fn eq<T: PartialEq>(want: Option<&T>, have: Option<&T>) -> bool {
            want.is_none_or(|w| have == Some(w))
        }

        let description_ok = self.description.as_deref().is_none_or(|needle| {
            entry
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
        });

        description_ok
            && eq(self.id.as_ref(), entry.id.as_ref())
            && eq(self.month.as_ref(), entry.month.as_ref())
            && eq(self.year.as_ref(), entry.year.as_ref())
            && eq(self.account_id.as_ref(), entry.account_id.as_ref())
            && eq(self.entry_type.as_ref(), entry.entry_type.as_ref())
            && eq(self.status.as_ref(), entry.status.as_ref())
    }
}
