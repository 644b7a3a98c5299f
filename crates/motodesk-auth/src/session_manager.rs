//! Opaque bearer-token session map.
//!
//! Tokens are 32-character NanoIDs held in a concurrent map with a TTL.
//! Sessions are process-local by design: a restart logs everyone out.

use dashmap::DashMap;
use motodesk_commons::models::ids::UserId;
use motodesk_commons::models::Role;

/// Token length. NanoID's 64-symbol alphabet gives ~190 bits here, well
/// past brute-force range.
const TOKEN_LENGTH: usize = 32;

/// A live session behind a bearer token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Issues, resolves and revokes bearer tokens.
pub struct SessionManager {
    sessions: DashMap<String, Session>,
    ttl_millis: i64,
}

impl SessionManager {
    pub fn new(ttl_hours: i64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl_millis: ttl_hours * 60 * 60 * 1000,
        }
    }

    /// Issue a fresh token for the given identity.
    pub fn issue(&self, user_id: UserId, username: impl Into<String>, role: Role) -> (String, Session) {
        let now = chrono::Utc::now().timestamp_millis();
        let token = nanoid::nanoid!(TOKEN_LENGTH);
        let session = Session {
            user_id,
            username: username.into(),
            role,
            issued_at: now,
            expires_at: now + self.ttl_millis,
        };
        self.sessions.insert(token.clone(), session.clone());
        (token, session)
    }

    /// Resolve a token to its session. Expired tokens are removed on the
    /// way out and resolve to `None`.
    pub fn resolve(&self, token: &str) -> Option<Session> {
        let now = chrono::Utc::now().timestamp_millis();
        let expired = match self.sessions.get(token) {
            Some(entry) if entry.expires_at > now => return Some(entry.value().clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.sessions.remove(token);
        }
        None
    }

    /// Revoke one token (logout). Unknown tokens are a no-op.
    pub fn revoke(&self, token: &str) {
        self.sessions.remove(token);
    }

    /// Revoke every session of one user. Used when an account is
    /// deactivated, deleted, or its password is changed by an admin.
    pub fn revoke_all_for(&self, user_id: &UserId) {
        self.sessions.retain(|_, session| &session.user_id != user_id);
    }

    /// Drop expired sessions. Called opportunistically: there is no
    /// background sweeper, `resolve` already evicts lazily.
    pub fn purge_expired(&self) {
        let now = chrono::Utc::now().timestamp_millis();
        self.sessions.retain(|_, session| session.expires_at > now);
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SessionManager {
        SessionManager::new(12)
    }

    #[test]
    fn test_issue_and_resolve() {
        let mgr = manager();
        let (token, _) = mgr.issue(UserId::new("u1"), "asha", Role::Manager);
        assert_eq!(token.len(), TOKEN_LENGTH);

        let session = mgr.resolve(&token).expect("token should resolve");
        assert_eq!(session.username, "asha");
        assert_eq!(session.role, Role::Manager);
    }

    #[test]
    fn test_revoke() {
        let mgr = manager();
        let (token, _) = mgr.issue(UserId::new("u1"), "asha", Role::Admin);
        mgr.revoke(&token);
        assert!(mgr.resolve(&token).is_none());
    }

    #[test]
    fn test_expired_token_is_evicted() {
        let mgr = SessionManager::new(0); // TTL of zero hours
        let (token, _) = mgr.issue(UserId::new("u1"), "asha", Role::Admin);
        assert!(mgr.resolve(&token).is_none());
        assert_eq!(mgr.active_count(), 0, "resolve should evict the entry");
    }

    #[test]
    fn test_revoke_all_for_user() {
        let mgr = manager();
        let (t1, _) = mgr.issue(UserId::new("u1"), "asha", Role::Manager);
        let (t2, _) = mgr.issue(UserId::new("u1"), "asha", Role::Manager);
        let (t3, _) = mgr.issue(UserId::new("u2"), "ravi", Role::Technician);

        mgr.revoke_all_for(&UserId::new("u1"));
        assert!(mgr.resolve(&t1).is_none());
        assert!(mgr.resolve(&t2).is_none());
        assert!(mgr.resolve(&t3).is_some());
    }
}
