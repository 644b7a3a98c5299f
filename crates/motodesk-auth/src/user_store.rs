//! Login account store.
//!
//! `UserStore` is the `EntityStore` for the `users` partition plus a
//! concurrent username index, since every login resolves a username rather
//! than a user id. The index is rebuilt from the partition at construction
//! and maintained on every write, so username lookups never scan.

use dashmap::DashMap;
use std::sync::Arc;

use crate::error::{AuthError, AuthResult};
use motodesk_commons::models::ids::UserId;
use motodesk_commons::types::User;
use motodesk_store::{EntityStore, StorageBackend};

/// Partition holding login accounts.
pub const USERS_PARTITION: &str = "users";

pub struct UserStore {
    backend: Arc<dyn StorageBackend>,
    username_index: DashMap<String, UserId>,
}

impl EntityStore<UserId, User> for UserStore {
    fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn partition(&self) -> &str {
        USERS_PARTITION
    }
}

impl UserStore {
    /// Create the store and rebuild the username index from the partition.
    pub fn new(backend: Arc<dyn StorageBackend>) -> AuthResult<Self> {
        let store = Self {
            backend,
            username_index: DashMap::new(),
        };
        for (_, user) in store.scan_all()? {
            store
                .username_index
                .insert(user.username.clone(), user.id.clone());
        }
        Ok(store)
    }

    /// Create a new account. The username must be unused, soft-deleted
    /// accounts included (their username stays reserved).
    pub fn create_user(&self, user: &User) -> AuthResult<()> {
        if self.username_index.contains_key(&user.username) {
            return Err(AuthError::UsernameTaken(user.username.clone()));
        }
        self.put(&user.id, user)?;
        self.username_index
            .insert(user.username.clone(), user.id.clone());
        Ok(())
    }

    pub fn get_by_id(&self, id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.get(id)?)
    }

    pub fn get_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let id = match self.username_index.get(username) {
            Some(entry) => entry.value().clone(),
            None => return Ok(None),
        };
        Ok(self.get(&id)?)
    }

    /// Persist changes to an existing account. Usernames are immutable;
    /// the index entry never moves.
    pub fn update_user(&self, user: &User) -> AuthResult<()> {
        self.put(&user.id, user)?;
        Ok(())
    }

    /// Soft-delete an account. The record stays (audit entries reference
    /// its id) but it is hidden from listings and cannot log in.
    pub fn soft_delete(&self, id: &UserId) -> AuthResult<User> {
        let mut user = self
            .get(id)?
            .ok_or_else(|| AuthError::UserNotFound(id.to_string()))?;
        let now = chrono::Utc::now().timestamp_millis();
        user.deleted_at = Some(now);
        user.active = false;
        user.updated_at = now;
        self.put(id, &user)?;
        Ok(user)
    }

    /// All non-deleted accounts, up to `limit`.
    pub fn list_users(&self, limit: usize) -> AuthResult<Vec<User>> {
        let users = self
            .scan_all()?
            .into_iter()
            .map(|(_, u)| u)
            .filter(|u| !u.is_deleted())
            .take(limit)
            .collect();
        Ok(users)
    }

    /// Whether any account exists at all (deleted ones included).
    /// Drives first-start admin seeding.
    pub fn is_empty(&self) -> AuthResult<bool> {
        Ok(self.scan_limited(1)?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motodesk_commons::models::Role;
    use motodesk_store::InMemoryBackend;

    fn store() -> UserStore {
        let backend: Arc<dyn StorageBackend> =
            Arc::new(InMemoryBackend::with_partitions(&[USERS_PARTITION]));
        UserStore::new(backend).unwrap()
    }

    #[test]
    fn test_create_and_lookup_by_username() {
        let store = store();
        let user = User::new("asha", "Asha Rao", "hash", Role::Manager);
        store.create_user(&user).unwrap();

        let found = store.get_by_username("asha").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(store.get_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = store();
        store
            .create_user(&User::new("ravi", "Ravi K", "hash", Role::Technician))
            .unwrap();
        let err = store
            .create_user(&User::new("ravi", "Other Ravi", "hash", Role::Admin))
            .unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken(_)));
    }

    #[test]
    fn test_soft_delete_hides_from_listing_but_reserves_username() {
        let store = store();
        let user = User::new("mala", "Mala S", "hash", Role::ServiceStaff);
        store.create_user(&user).unwrap();
        store.soft_delete(&user.id).unwrap();

        assert!(store.list_users(100).unwrap().is_empty());
        // Username stays reserved
        let err = store
            .create_user(&User::new("mala", "New Mala", "hash", Role::ServiceStaff))
            .unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken(_)));
    }

    #[test]
    fn test_index_rebuilt_on_construction() {
        let backend: Arc<dyn StorageBackend> =
            Arc::new(InMemoryBackend::with_partitions(&[USERS_PARTITION]));
        {
            let store = UserStore::new(backend.clone()).unwrap();
            store
                .create_user(&User::new("kiran", "Kiran B", "hash", Role::Admin))
                .unwrap();
        }
        let reopened = UserStore::new(backend).unwrap();
        assert!(reopened.get_by_username("kiran").unwrap().is_some());
    }
}
