//! Account guard: authentication and account creation rules.

use tally_shared::types::AccountId;

use super::credential::CredentialScheme;
use super::error::{AccountError, AuthenticationFailure};
use super::Account;
use crate::repository::{AccountStore, StoreError};

/// Normalises an email for storage and comparison.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Authenticates accounts and enforces email uniqueness on creation.
#[derive(Debug, Clone)]
pub struct AccountGuard<S> {
    store: S,
    scheme: CredentialScheme,
}

impl<S: AccountStore> AccountGuard<S> {
    /// Creates a guard that stores secrets in plaintext.
    pub fn new(store: S) -> Self {
        Self::with_scheme(store, CredentialScheme::Plaintext)
    }

    /// Creates a guard with an explicit credential scheme.
    pub const fn with_scheme(store: S, scheme: CredentialScheme) -> Self {
        Self { store, scheme }
    }

    /// Logs an account in.
    ///
    /// Existence is checked before the credential, and the two failures
    /// report different reasons.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailure::AccountNotFound` if no account uses the
    /// email, `AuthenticationFailure::InvalidCredential` if the secret does not
    /// match.
    pub async fn authenticate(&self, email: &str, secret: &str) -> Result<Account, AccountError> {
        let account = self
            .store
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AuthenticationFailure::AccountNotFound)?;

        if !self.scheme.verify(secret, &account.secret)? {
            return Err(AuthenticationFailure::InvalidCredential.into());
        }

        Ok(account)
    }

    /// Fails if any account already uses `email`.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::EmailTaken` when the email is registered.
    pub async fn validate_email_uniqueness(&self, email: &str) -> Result<(), AccountError> {
        let email = normalize_email(email);
        if self.store.exists_by_email(&email).await? {
            return Err(AccountError::EmailTaken(email));
        }
        Ok(())
    }

    /// Registers a new account.
    ///
    /// The email is normalised and checked for uniqueness first; the secret is
    /// sealed with the configured scheme before it reaches the store.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::EmailTaken` without touching the store's write
    /// path when the email is already registered. A uniqueness conflict
    /// reported by the store itself maps to the same error.
    pub async fn create_account(&self, mut account: Account) -> Result<Account, AccountError> {
        self.validate_email_uniqueness(&account.email).await?;

        account.email = normalize_email(&account.email);
        account.secret = self.scheme.seal(&account.secret)?;

        let email = account.email.clone();
        self.store.save(account).await.map_err(|err| match err {
            // another registration won the race after the uniqueness check
            StoreError::Conflict(_) => AccountError::EmailTaken(email),
            other => other.into(),
        })
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.store.find_by_id(id).await?)
    }
}
