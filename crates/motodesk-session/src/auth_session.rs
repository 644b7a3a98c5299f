//! Authenticated session context
//!
//! `AuthSession` is the bridge between the bearer middleware and everything
//! downstream: handlers read the caller's identity and role from it, and
//! audit entries record its user id and username as the actor.

use motodesk_commons::models::ids::UserId;
use motodesk_commons::models::Role;
use std::time::SystemTime;

/// Authenticated session with user identity and request metadata.
///
/// # Fields
/// - `user_id` / `username` / `role`: the authenticated caller
/// - `request_id`: request tracking id (for 401 bodies and log correlation)
/// - `ip_address`: client IP, when known
/// - `timestamp`: when this session context was created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub request_id: Option<String>,
    pub ip_address: Option<String>,
    pub timestamp: SystemTime,
}

impl AuthSession {
    /// Create a new authenticated session.
    pub fn new(user_id: UserId, username: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
            request_id: None,
            ip_address: None,
            timestamp: SystemTime::now(),
        }
    }

    // Builder methods

    /// Set the request tracking ID
    pub fn with_request_id(mut self, request_id: String) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Set the client IP address
    pub fn with_ip(mut self, ip_address: String) -> Self {
        self.ip_address = Some(ip_address);
        self
    }

    // Accessor methods

    #[inline]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[inline]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    #[inline]
    pub fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        crate::rbac::is_admin_role(self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_session_new() {
        let session = AuthSession::new(UserId::new("alice"), "alice", Role::Technician);
        assert_eq!(session.user_id().as_str(), "alice");
        assert_eq!(session.username(), "alice");
        assert_eq!(session.role(), Role::Technician);
        assert!(!session.is_admin());
    }

    #[test]
    fn test_auth_session_builder() {
        let session = AuthSession::new(UserId::new("bob"), "bob", Role::Manager)
            .with_request_id("req_123".to_string())
            .with_ip("127.0.0.1".to_string());

        assert_eq!(session.request_id(), Some("req_123"));
        assert_eq!(session.ip_address(), Some("127.0.0.1"));
    }

    #[test]
    fn test_is_admin() {
        let admin = AuthSession::new(UserId::new("root"), "root", Role::Admin);
        assert!(admin.is_admin());

        let manager = AuthSession::new(UserId::new("m"), "m", Role::Manager);
        assert!(!manager.is_admin());
    }
}
