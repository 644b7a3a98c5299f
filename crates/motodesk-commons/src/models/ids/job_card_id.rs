//! Type-safe wrapper for job card identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::StorageKey;

/// Type-safe wrapper for job card identifiers.
///
/// Ensures job card IDs cannot be accidentally used where customer or bay IDs
/// are expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobCardId(String);

impl JobCardId {
    /// Creates a new JobCardId from a string.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a new unique JobCardId using NanoID.
    #[inline]
    pub fn generate() -> Self {
        Self(nanoid::nanoid!())
    }

    /// Returns the job card ID as a string slice.
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

impl fmt::Display for JobCardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobCardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobCardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for JobCardId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl StorageKey for JobCardId {
    fn storage_key(&self) -> Vec<u8> {
        self.0.as_bytes().to_vec()
    }

    fn from_storage_key(bytes: &[u8]) -> Result<Self, String> {
        String::from_utf8(bytes.to_vec()).map(JobCardId).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_round_trip() {
        let id = JobCardId::generate();
        assert_eq!(id.as_str().len(), 21);
        let bytes = id.storage_key();
        assert_eq!(JobCardId::from_storage_key(&bytes).unwrap(), id);
    }
}
