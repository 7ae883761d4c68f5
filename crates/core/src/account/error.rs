//! Account error types.

use tally_shared::AppError;
use thiserror::Error;

use super::credential::CredentialError;
use crate::repository::StoreError;

/// Why a login attempt was refused.
///
/// The two reasons are deliberately distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthenticationFailure {
    /// No account is registered under the email.
    #[error("account not found")]
    AccountNotFound,

    /// The account exists but the secret does not match.
    #[error("invalid credential")]
    InvalidCredential,
}

/// Account-related errors.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Login refused.
    #[error(transparent)]
    Authentication(#[from] AuthenticationFailure),

    /// Another account already uses this email.
    #[error("An account is already registered with this email: {0}")]
    EmailTaken(String),

    /// Sealing or checking a secret failed.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// The persistence collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AccountError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Authentication(AuthenticationFailure::AccountNotFound) => "ACCOUNT_NOT_FOUND",
            Self::Authentication(AuthenticationFailure::InvalidCredential) => "INVALID_CREDENTIAL",
            Self::EmailTaken(_) => "EMAIL_TAKEN",
            Self::Credential(_) => "CREDENTIAL_ERROR",
            Self::Store(_) => "DATABASE_ERROR",
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        let message = err.to_string();
        match err {
            AccountError::Authentication(_) => Self::Unauthorized(message),
            AccountError::EmailTaken(_) => Self::BusinessRule(message),
            AccountError::Credential(_) => Self::Internal(message),
            AccountError::Store(_) => Self::Database(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_reasons_are_distinct() {
        let missing = AccountError::from(AuthenticationFailure::AccountNotFound);
        let wrong = AccountError::from(AuthenticationFailure::InvalidCredential);

        assert_eq!(missing.to_string(), "account not found");
        assert_eq!(wrong.to_string(), "invalid credential");
        assert_ne!(missing.error_code(), wrong.error_code());
    }

    #[test]
    fn test_conversion_to_app_error() {
        let app: AppError = AccountError::EmailTaken("a@b.com".into()).into();
        assert_eq!(app.status_code(), 422);

        let app: AppError = AccountError::from(AuthenticationFailure::InvalidCredential).into();
        assert!(matches!(app, AppError::Unauthorized(ref m) if m == "invalid credential"));
    }
}
