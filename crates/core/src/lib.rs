//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here; storage is
//! reached only through the traits in [`repository`].
//!
//! # Modules
//!
//! - `ledger` - Entries, invariants, lifecycle and balances
//! - `account` - Accounts, credentials and the login guard
//! - `repository` - Persistence ports and an in-memory store

pub mod account;
pub mod ledger;
pub mod repository;

pub use account::{Account, AccountError, AccountGuard};
pub use ledger::{
    BalanceService, EntryStatus, EntryType, LedgerEntry, LedgerError, LedgerService,
};
pub use repository::{AccountStore, EntryStore, StoreError};
