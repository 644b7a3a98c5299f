//! Authentication error types.

use thiserror::Error;

/// Result type for authentication operations.
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Errors raised by the authentication layer.
///
/// The API layer collapses `InvalidCredentials`, `UserNotFound` and
/// `AccountDisabled` into one generic "Invalid username or password"
/// response so callers cannot probe which usernames exist.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials for '{0}'")]
    InvalidCredentials(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Account is deactivated")]
    AccountDisabled,

    #[error("Account is temporarily locked: {0}")]
    AccountLocked(String),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Weak password: {0}")]
    WeakPassword(String),

    #[error("Invalid or expired session token")]
    InvalidToken,

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<motodesk_store::StorageError> for AuthError {
    fn from(e: motodesk_store::StorageError) -> Self {
        AuthError::StorageError(e.to_string())
    }
}
