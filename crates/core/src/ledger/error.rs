//! Ledger error types for validation, lifecycle and storage failures.

use tally_shared::AppError;
use tally_shared::types::{AccountId, EntryId};
use thiserror::Error;

use super::validation::EntryValidationError;
use crate::repository::StoreError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// An entry invariant is violated; the caller should correct the input.
    #[error(transparent)]
    Validation(#[from] EntryValidationError),

    /// An operation that needs a stored entry received one without an ID.
    ///
    /// This is caller misuse, not a user-facing business failure.
    #[error("Cannot {operation} an entry that has not been saved")]
    NotPersisted {
        /// The attempted operation.
        operation: &'static str,
    },

    /// No entry with this ID.
    #[error("Entry not found: {0}")]
    NotFound(EntryId),

    /// No account with this ID.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// The persistence collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "INVALID_ENTRY",
            Self::NotPersisted { .. } => "ENTRY_NOT_PERSISTED",
            Self::NotFound(_) => "ENTRY_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::Store(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) | Self::AccountNotFound(_) => 404,
            Self::NotPersisted { .. } | Self::Store(_) => 500,
        }
    }

    /// Returns true if this error signals a programming-contract violation.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self, Self::NotPersisted { .. })
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::Validation(_) => Self::Validation(message),
            LedgerError::NotFound(_) | LedgerError::AccountNotFound(_) => Self::NotFound(message),
            LedgerError::NotPersisted { .. } => Self::Internal(message),
            LedgerError::Store(_) => Self::Database(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_reason_is_kept_verbatim() {
        let err = LedgerError::from(EntryValidationError::InvalidMonth);
        assert_eq!(err.to_string(), "Provide a valid month.");
        assert_eq!(err.http_status_code(), 400);
        assert!(!err.is_contract_violation());
    }

    #[test]
    fn test_not_persisted_is_contract_violation() {
        let err = LedgerError::NotPersisted { operation: "update" };
        assert_eq!(err.to_string(), "Cannot update an entry that has not been saved");
        assert_eq!(err.error_code(), "ENTRY_NOT_PERSISTED");
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_conversion_to_app_error() {
        let app: AppError = LedgerError::from(EntryValidationError::InvalidValue).into();
        assert!(matches!(app, AppError::Validation(ref m) if m == "Provide a valid value."));

        let app: AppError = LedgerError::NotFound(EntryId::generate()).into();
        assert_eq!(app.status_code(), 404);

        let app: AppError = LedgerError::NotPersisted { operation: "delete" }.into();
        assert_eq!(app.status_code(), 500);

        let app: AppError = LedgerError::Store(StoreError::Backend("down".into())).into();
        assert_eq!(app.error_code(), "DATABASE_ERROR");
    }
}
