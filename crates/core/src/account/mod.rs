//! Accounts: the owners of ledger entries.
//!
//! This module provides:
//! - The `Account` entity
//! - Credential schemes (plaintext parity or Argon2id)
//! - The account guard: login and email-uniqueness rules

pub mod credential;
pub mod error;
pub mod guard;

pub use credential::{CredentialError, CredentialScheme};
pub use error::{AccountError, AuthenticationFailure};
pub use guard::{AccountGuard, normalize_email};

use serde::{Deserialize, Serialize};
use tally_shared::types::AccountId;

/// A registered user who owns ledger entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Assigned by the store on creation.
    pub id: Option<AccountId>,
    /// Display name.
    pub name: String,
    /// Login email, unique across accounts.
    pub email: String,
    /// Stored credential (raw or hashed, depending on the scheme).
    #[serde(skip_serializing)]
    pub secret: String,
}

impl Account {
    /// Creates an unsaved account.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            secret: secret.into(),
        }
    }
}
