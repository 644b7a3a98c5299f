//! Login account entity.

use serde::{Deserialize, Serialize};

use crate::models::ids::{StaffId, UserId};
use crate::models::Role;

/// Failed attempts before an account is locked, when configuration does not
/// say otherwise.
pub const DEFAULT_MAX_FAILED_ATTEMPTS: u32 = 5;

/// Minutes an account stays locked after too many failed attempts.
pub const DEFAULT_LOCKOUT_DURATION_MINUTES: i64 = 15;

/// Login account entity.
///
/// ## Fields
/// - `id`: Unique account identifier
/// - `username`: Unique login name
/// - `password_hash`: bcrypt hash, never exposed through the API
/// - `role`: Application role, drives every permission check
/// - `staff_id`: Workshop staff record this login belongs to, if any
/// - `active`: Deactivated accounts exist but cannot log in
/// - `failed_login_attempts` / `locked_until`: Brute-force lockout state
/// - `deleted_at`: Soft-delete marker set by DELETE; such accounts are
///   hidden from listings and cannot authenticate
///
/// ## Example
///
/// ```rust
/// use motodesk_commons::types::User;
/// use motodesk_commons::Role;
///
/// let user = User::new("ravi", "Ravi Kumar", "$2b$12$...", Role::Technician);
/// assert_eq!(user.username, "ravi");
/// assert!(user.active);
/// assert!(!user.is_locked(chrono::Utc::now().timestamp_millis()));
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub email: Option<String>,
    pub staff_id: Option<StaffId>,
    pub active: bool,
    pub failed_login_attempts: u32,
    pub locked_until: Option<i64>,
    pub last_login_at: Option<i64>,
    pub created_at: i64, // Unix timestamp in milliseconds
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

impl User {
    /// Create a new active user with a generated id and current timestamps.
    pub fn new(
        username: impl Into<String>,
        full_name: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: UserId::generate(),
            username: username.into(),
            password_hash: password_hash.into(),
            full_name: full_name.into(),
            role,
            email: None,
            staff_id: None,
            active: true,
            failed_login_attempts: 0,
            locked_until: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Whether the account is locked out at `now` (Unix millis).
    #[inline]
    pub fn is_locked(&self, now: i64) -> bool {
        matches!(self.locked_until, Some(until) if until > now)
    }

    /// Soft-deleted accounts stay in the store but cannot authenticate.
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_active_and_unlocked() {
        let user = User::new("alice", "Alice Rao", "hash", Role::Manager);
        assert!(user.active);
        assert_eq!(user.failed_login_attempts, 0);
        assert!(!user.is_locked(chrono::Utc::now().timestamp_millis()));
        assert!(!user.is_deleted());
    }

    #[test]
    fn test_lockout_expires() {
        let mut user = User::new("bob", "Bob M", "hash", Role::Technician);
        user.locked_until = Some(1_000);
        assert!(user.is_locked(999));
        assert!(!user.is_locked(1_000));
        assert!(!user.is_locked(2_000));
    }
}
