use thiserror::Error;

use crate::storage::StorageError;

/// Errors reported by the session directory.
///
/// `DuplicateIdentity` and `InvalidCredentials` are the expected outcomes a
/// caller renders to the user; neither leaves partial state behind.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Error: Student ID already exists.")]
    DuplicateIdentity(String),

    #[error("Login Failed: Incorrect ID or Password.")]
    InvalidCredentials,

    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl From<bcrypt::BcryptError> for PortalError {
    fn from(e: bcrypt::BcryptError) -> Self {
        PortalError::PasswordHash(e.to_string())
    }
}
