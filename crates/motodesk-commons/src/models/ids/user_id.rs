//! Type-safe wrapper for login account identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::StorageKey;

/// Type-safe wrapper for login account identifiers.
///
/// Ensures user IDs cannot be accidentally used where staff or customer IDs
/// are expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

/// Error type for UserId validation failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdValidationError(pub String);

impl fmt::Display for UserIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for UserIdValidationError {}

impl UserId {
    /// Creates a new UserId from a string.
    ///
    /// # Panics
    /// Panics if the ID contains path traversal characters. Use `try_new()`
    /// for fallible creation.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self::try_new(id).expect("UserId contains invalid characters")
    }

    /// Creates a new UserId from a string, returning an error if validation fails.
    ///
    /// # Security
    /// Validates that the ID does not contain path traversal characters:
    /// - `..` (parent directory)
    /// - `/` or `\` (directory separators)
    /// - Null bytes (`\0`)
    ///
    /// User IDs end up in log lines and export paths, so they are never
    /// allowed to carry path syntax.
    pub fn try_new(id: impl Into<String>) -> Result<Self, UserIdValidationError> {
        let id = id.into();
        Self::validate_id(&id)?;
        Ok(Self(id))
    }

    fn validate_id(id: &str) -> Result<(), UserIdValidationError> {
        if id.contains("..") {
            return Err(UserIdValidationError(
                "User ID cannot contain '..' (path traversal)".to_string(),
            ));
        }
        if id.contains('/') {
            return Err(UserIdValidationError(
                "User ID cannot contain '/' (directory separator)".to_string(),
            ));
        }
        if id.contains('\\') {
            return Err(UserIdValidationError(
                "User ID cannot contain '\\' (directory separator)".to_string(),
            ));
        }
        if id.contains('\0') {
            return Err(UserIdValidationError("User ID cannot contain null bytes".to_string()));
        }
        if id.is_empty() {
            return Err(UserIdValidationError("User ID cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Generates a new unique UserId using NanoID (21 URL-safe characters).
    ///
    /// Uses the default NanoID alphabet (`A-Za-z0-9_-`) which is safe for
    /// URLs, log lines and database keys.
    #[inline]
    pub fn generate() -> Self {
        Self(nanoid::nanoid!())
    }

    /// Returns the user ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner String.
    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    /// Converts a String into UserId.
    ///
    /// # Panics
    /// Panics if the string contains path traversal characters.
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for UserId {
    /// Converts a &str into UserId.
    ///
    /// # Panics
    /// Panics if the string contains path traversal characters.
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl StorageKey for UserId {
    fn storage_key(&self) -> Vec<u8> {
        self.0.as_bytes().to_vec()
    }

    fn from_storage_key(bytes: &[u8]) -> Result<Self, String> {
        String::from_utf8(bytes.to_vec()).map(UserId).map_err(|e| e.to_string())
    }
}
