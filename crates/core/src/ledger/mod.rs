//! Personal ledger logic.
//!
//! This module implements:
//! - Ledger entries (income and expense records)
//! - Invariant checks run before every create and update
//! - The entry lifecycle (save, update, delete, status changes)
//! - Query-by-example filters
//! - Balance aggregation

pub mod balance;
pub mod entry;
pub mod error;
pub mod filter;
pub mod service;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use balance::{BalanceService, BalanceSummary};
pub use entry::{EntryStatus, EntryType, LedgerEntry};
pub use error::LedgerError;
pub use filter::EntryFilter;
pub use service::LedgerService;
pub use validation::{EntryValidationError, validate_entry};
