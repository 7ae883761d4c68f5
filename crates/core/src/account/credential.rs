//! Credential storage schemes.
//!
//! `Plaintext` stores secrets as given and compares them for exact equality.
//! `Argon2` stores an Argon2id PHC string with secure defaults. Both honour the
//! same pass/fail contract, so switching schemes never changes which logins
//! succeed for newly created accounts.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tally_shared::CredentialSchemeKind;
use thiserror::Error;

/// Errors that can occur during credential operations.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Failed to hash the secret.
    #[error("failed to hash secret: {0}")]
    HashError(String),

    /// Failed to verify the secret.
    #[error("failed to verify secret: {0}")]
    VerifyError(String),

    /// Stored value is not a valid hash for the scheme.
    #[error("invalid stored credential format")]
    InvalidHash,
}

/// How account secrets are sealed for storage and checked at login.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CredentialScheme {
    /// Store as-is, compare by equality.
    #[default]
    Plaintext,
    /// Store Argon2id hashes.
    Argon2,
}

impl From<CredentialSchemeKind> for CredentialScheme {
    fn from(kind: CredentialSchemeKind) -> Self {
        match kind {
            CredentialSchemeKind::Plaintext => Self::Plaintext,
            CredentialSchemeKind::Argon2 => Self::Argon2,
        }
    }
}

impl CredentialScheme {
    /// Turns a raw secret into its stored form.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::HashError` if hashing fails.
    pub fn seal(self, secret: &str) -> Result<String, CredentialError> {
        match self {
            Self::Plaintext => Ok(secret.to_string()),
            Self::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(secret.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| CredentialError::HashError(e.to_string()))
            }
        }
    }

    /// Checks a supplied secret against the stored form.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::InvalidHash` if `stored` is not a PHC string
    /// under the Argon2 scheme.
    pub fn verify(self, supplied: &str, stored: &str) -> Result<bool, CredentialError> {
        match self {
            Self::Plaintext => Ok(supplied == stored),
            Self::Argon2 => {
                let parsed = PasswordHash::new(stored).map_err(|_| CredentialError::InvalidHash)?;
                match Argon2::default().verify_password(supplied.as_bytes(), &parsed) {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(CredentialError::VerifyError(e.to_string())),
                }
            }
        }
    }
}
