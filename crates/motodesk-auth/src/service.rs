//! Login, logout and account management flows.

use std::sync::Arc;

use log::{info, warn};

use crate::error::{AuthError, AuthResult};
use crate::password;
use crate::session_manager::{Session, SessionManager};
use crate::user_store::UserStore;
use motodesk_commons::models::ids::UserId;
use motodesk_commons::models::Role;
use motodesk_commons::types::User;
use motodesk_configs::AuthSettings;

/// Username of the account seeded on first start.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Environment variable that overrides the seeded admin password.
pub const ADMIN_PASSWORD_ENV: &str = "MOTODESK_ADMIN_PASSWORD";

/// Authentication facade over the user store and session map.
///
/// Handlers talk to this; nothing outside this crate touches password
/// hashes or lockout counters directly.
pub struct AuthService {
    users: Arc<UserStore>,
    sessions: Arc<SessionManager>,
    settings: AuthSettings,
}

impl AuthService {
    pub fn new(users: Arc<UserStore>, sessions: Arc<SessionManager>, settings: AuthSettings) -> Self {
        Self {
            users,
            sessions,
            settings,
        }
    }

    #[inline]
    pub fn users(&self) -> &Arc<UserStore> {
        &self.users
    }

    #[inline]
    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    /// Authenticate a username/password pair and issue a bearer token.
    ///
    /// Tracks consecutive failures and locks the account for
    /// `lockout_minutes` once `max_failed_logins` is reached. The counter
    /// resets on a successful login.
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<(User, String, Session)> {
        let mut user = self
            .users
            .get_by_username(username)?
            .ok_or_else(|| AuthError::UserNotFound(username.to_string()))?;

        if user.is_deleted() {
            return Err(AuthError::UserNotFound(username.to_string()));
        }
        if !user.active {
            return Err(AuthError::AccountDisabled);
        }

        let now = chrono::Utc::now().timestamp_millis();
        if user.is_locked(now) {
            return Err(AuthError::AccountLocked(format!(
                "Too many failed attempts; try again in up to {} minutes",
                self.settings.lockout_minutes
            )));
        }

        let verified = password::verify_password(password, &user.password_hash).await?;
        if !verified {
            user.failed_login_attempts += 1;
            if user.failed_login_attempts >= self.settings.max_failed_logins {
                user.locked_until = Some(now + self.settings.lockout_minutes * 60 * 1000);
                user.failed_login_attempts = 0;
                warn!(
                    "Account '{}' locked for {} minutes after repeated failed logins",
                    user.username, self.settings.lockout_minutes
                );
            }
            user.updated_at = now;
            self.users.update_user(&user)?;
            return Err(AuthError::InvalidCredentials(username.to_string()));
        }

        user.failed_login_attempts = 0;
        user.locked_until = None;
        user.last_login_at = Some(now);
        user.updated_at = now;
        self.users.update_user(&user)?;

        let (token, session) = self
            .sessions
            .issue(user.id.clone(), user.username.clone(), user.role);
        Ok((user, token, session))
    }

    /// Revoke one bearer token.
    pub fn logout(&self, token: &str) {
        self.sessions.revoke(token);
    }

    /// Create a login account with a validated, hashed password.
    pub async fn create_user(
        &self,
        username: &str,
        full_name: &str,
        password: &str,
        role: Role,
    ) -> AuthResult<User> {
        if username.trim().is_empty() {
            return Err(AuthError::InvalidCredentials(
                "username cannot be empty".to_string(),
            ));
        }
        password::validate_password(password, self.settings.min_password_length)?;
        let hash = password::hash_password(password, Some(self.settings.bcrypt_cost)).await?;

        let user = User::new(username, full_name, hash, role);
        self.users.create_user(&user)?;
        Ok(user)
    }

    /// Change an account's password.
    ///
    /// When `current_password` is given it must verify against the stored
    /// hash (self-service flow). Admins changing someone else's password
    /// pass `None`; in that case every live session of the target account
    /// is revoked.
    pub async fn change_password(
        &self,
        user_id: &UserId,
        new_password: &str,
        current_password: Option<&str>,
    ) -> AuthResult<()> {
        let mut user = self
            .users
            .get_by_id(user_id)?
            .ok_or_else(|| AuthError::UserNotFound(user_id.to_string()))?;

        if let Some(current) = current_password {
            let ok = password::verify_password(current, &user.password_hash).await?;
            if !ok {
                return Err(AuthError::InvalidCredentials(user.username.clone()));
            }
        }

        password::validate_password(new_password, self.settings.min_password_length)?;
        user.password_hash =
            password::hash_password(new_password, Some(self.settings.bcrypt_cost)).await?;
        user.updated_at = chrono::Utc::now().timestamp_millis();
        self.users.update_user(&user)?;

        if current_password.is_none() {
            self.sessions.revoke_all_for(user_id);
        }
        Ok(())
    }

    /// Seed the first admin account when the user store is empty.
    ///
    /// Password resolution order: `MOTODESK_ADMIN_PASSWORD` env var, then
    /// `[auth] default_admin_password` from config, else a random one that
    /// is printed exactly once.
    pub async fn seed_admin_if_empty(&self) -> AuthResult<Option<User>> {
        if !self.users.is_empty()? {
            return Ok(None);
        }

        let (seed_password, generated) = match std::env::var(ADMIN_PASSWORD_ENV) {
            Ok(p) if !p.is_empty() => (p, false),
            _ => match self.settings.default_admin_password.clone() {
                Some(p) if !p.is_empty() => (p, false),
                _ => (nanoid::nanoid!(16), true),
            },
        };

        let hash = password::hash_password(&seed_password, Some(self.settings.bcrypt_cost)).await?;
        let user = User::new(DEFAULT_ADMIN_USERNAME, "Administrator", hash, Role::Admin);
        self.users.create_user(&user)?;

        if generated {
            info!(
                "Seeded admin account '{}' with generated password: {}",
                DEFAULT_ADMIN_USERNAME, seed_password
            );
        } else {
            info!("Seeded admin account '{}'", DEFAULT_ADMIN_USERNAME);
        }
        warn!("Change the seeded admin password after first login");
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motodesk_store::{InMemoryBackend, StorageBackend};

    fn service() -> AuthService {
        let backend: Arc<dyn StorageBackend> =
            Arc::new(InMemoryBackend::with_partitions(&[crate::user_store::USERS_PARTITION]));
        let users = Arc::new(UserStore::new(backend).unwrap());
        let sessions = Arc::new(SessionManager::new(12));
        let settings = AuthSettings {
            bcrypt_cost: 4, // keep tests fast
            max_failed_logins: 3,
            ..AuthSettings::default()
        };
        AuthService::new(users, sessions, settings)
    }

    #[tokio::test]
    async fn test_login_happy_path() {
        let svc = service();
        svc.create_user("asha", "Asha Rao", "CorrectHorse9!", Role::Manager)
            .await
            .unwrap();

        let (user, token, session) = svc.login("asha", "CorrectHorse9!").await.unwrap();
        assert_eq!(user.username, "asha");
        assert!(user.last_login_at.is_some());
        assert_eq!(session.role, Role::Manager);
        assert!(svc.sessions().resolve(&token).is_some());
    }

    #[tokio::test]
    async fn test_wrong_password_then_lockout() {
        let svc = service();
        svc.create_user("ravi", "Ravi K", "CorrectHorse9!", Role::Technician)
            .await
            .unwrap();

        for _ in 0..3 {
            let err = svc.login("ravi", "wrong-password").await.unwrap_err();
            assert!(matches!(
                err,
                AuthError::InvalidCredentials(_)
            ));
        }

        // Account is now locked, even with the right password
        let err = svc.login("ravi", "CorrectHorse9!").await.unwrap_err();
        assert!(matches!(err, AuthError::AccountLocked(_)));
    }

    #[tokio::test]
    async fn test_deactivated_user_cannot_login() {
        let svc = service();
        let user = svc
            .create_user("mala", "Mala S", "CorrectHorse9!", Role::ServiceStaff)
            .await
            .unwrap();

        let mut stored = svc.users().get_by_id(&user.id).unwrap().unwrap();
        stored.active = false;
        svc.users().update_user(&stored).unwrap();

        let err = svc.login("mala", "CorrectHorse9!").await.unwrap_err();
        assert!(matches!(err, AuthError::AccountDisabled));
    }

    #[tokio::test]
    async fn test_weak_password_rejected_on_create() {
        let svc = service();
        let err = svc
            .create_user("kiran", "Kiran B", "short", Role::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(_)));
    }

    #[tokio::test]
    async fn test_change_password_requires_current_for_self_service() {
        let svc = service();
        let user = svc
            .create_user("asha", "Asha Rao", "CorrectHorse9!", Role::Manager)
            .await
            .unwrap();

        let err = svc
            .change_password(&user.id, "NewPassword10!", Some("not-the-password"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials(_)));

        svc.change_password(&user.id, "NewPassword10!", Some("CorrectHorse9!"))
            .await
            .unwrap();
        assert!(svc.login("asha", "NewPassword10!").await.is_ok());
    }

    #[tokio::test]
    async fn test_admin_password_reset_revokes_sessions() {
        let svc = service();
        let user = svc
            .create_user("ravi", "Ravi K", "CorrectHorse9!", Role::Technician)
            .await
            .unwrap();
        let (_, token, _) = svc.login("ravi", "CorrectHorse9!").await.unwrap();

        svc.change_password(&user.id, "ResetByAdmin10!", None)
            .await
            .unwrap();
        assert!(svc.sessions().resolve(&token).is_none());
    }

    #[tokio::test]
    async fn test_seed_admin_only_once() {
        let svc = service();
        assert!(svc.seed_admin_if_empty().await.unwrap().is_some());
        assert!(svc.seed_admin_if_empty().await.unwrap().is_none());
    }
}
