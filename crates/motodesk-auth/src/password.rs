// Password hashing and validation module

use crate::error::{AuthError, AuthResult};
use bcrypt::{hash, verify, DEFAULT_COST};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Bcrypt cost factor for password hashing when configuration does not
/// override it. Higher values = more secure but slower.
pub const BCRYPT_COST: u32 = DEFAULT_COST;

/// Minimum password length when configuration does not override it.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (bcrypt has a 72-byte limit)
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Common passwords list (loaded once)
static COMMON_PASSWORDS: OnceLock<HashSet<String>> = OnceLock::new();

/// Hash a password using bcrypt.
///
/// Runs on a blocking thread pool to avoid stalling the async runtime.
///
/// # Arguments
/// * `password` - Plain text password to hash
/// * `cost` - Optional bcrypt cost (defaults to BCRYPT_COST)
///
/// # Errors
/// Returns `AuthError::HashingError` if bcrypt fails
pub async fn hash_password(password: &str, cost: Option<u32>) -> AuthResult<String> {
    let password = password.to_string();
    let cost = cost.unwrap_or(BCRYPT_COST);

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| AuthError::HashingError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashingError(format!("Task join error: {}", e)))?
}

/// Verify a password against a bcrypt hash.
///
/// Runs on a blocking thread pool to avoid stalling the async runtime.
///
/// # Returns
/// `Ok(true)` if password matches, `Ok(false)` if not, `Err` on failure
pub async fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &hash).map_err(|e| AuthError::HashingError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashingError(format!("Task join error: {}", e)))?
}

/// Validate password meets security requirements.
///
/// Checks:
/// - Minimum length (`min_length`, from the `[auth]` config section)
/// - Maximum length (72 characters for bcrypt)
/// - Not in the common passwords list
///
/// # Errors
/// Returns `AuthError::WeakPassword` with the specific reason
pub fn validate_password(password: &str, min_length: usize) -> AuthResult<()> {
    if password.len() < min_length {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {} characters",
            min_length
        )));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at most {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }

    if is_common_password(password) {
        return Err(AuthError::WeakPassword(
            "Password is too common".to_string(),
        ));
    }

    Ok(())
}

/// Check if a password is in the common passwords list.
///
/// Loads the list on first call (lazy initialization).
fn is_common_password(password: &str) -> bool {
    let common_passwords = COMMON_PASSWORDS.get_or_init(|| {
        let passwords = vec![
            "password", "123456", "12345678", "qwerty", "abc123", "monkey", "1234567", "letmein",
            "trustno1", "dragon", "baseball", "iloveyou", "master", "sunshine", "ashley", "bailey",
            "passw0rd", "shadow", "123123", "654321", "superman", "qazwsx", "michael", "football",
        ];
        passwords.iter().map(|s| s.to_string()).collect()
    });

    common_passwords.contains(password)
}
