//! Repository implementations of the core persistence ports.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod entry;

pub use account::AccountRepository;
pub use entry::EntryRepository;

use sea_orm::{DbErr, SqlErr};
use tally_core::repository::StoreError;

/// Maps a `SeaORM` error onto the storage error the core understands.
pub(crate) fn store_err(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => return StoreError::Conflict(detail),
        // a ledger entry pointing at an account that does not exist
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            return StoreError::MissingRecord(detail);
        }
        _ => {}
    }

    match err {
        DbErr::RecordNotFound(detail) => StoreError::MissingRecord(detail),
        DbErr::RecordNotUpdated => StoreError::MissingRecord("no row matched the update".into()),
        other => StoreError::Backend(other.to_string()),
    }
}
