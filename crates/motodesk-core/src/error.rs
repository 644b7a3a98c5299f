// Error types module
use thiserror::Error;

/// Result type for domain service operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Main error type for MotoDesk domain services.
///
/// Variants map one-to-one onto HTTP status codes at the API layer:
/// Validation → 400, PermissionDenied → 403, NotFound → 404,
/// Conflict → 409, Storage/Internal → 500.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Storage error: {0}")]
    Storage(#[from] motodesk_store::StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ServiceError::conflict("bay T1 is occupied").to_string(),
            "Conflict: bay T1 is occupied"
        );
        assert_eq!(
            ServiceError::not_found("job card jc_1").to_string(),
            "Not found: job card jc_1"
        );
    }

    #[test]
    fn test_storage_error_converts() {
        let err: ServiceError =
            motodesk_store::StorageError::PartitionNotFound("bays".to_string()).into();
        assert!(matches!(err, ServiceError::Storage(_)));
    }
}
