//! Public view of a login account.

use serde::Serialize;

use motodesk_commons::models::ids::{StaffId, UserId};
use motodesk_commons::models::Role;
use motodesk_commons::types::User;

/// A login account without its secrets. Every user-facing endpoint goes
/// through this; the password hash and lockout counters never leave the
/// server.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub email: Option<String>,
    pub staff_id: Option<StaffId>,
    pub active: bool,
    pub last_login_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            role: user.role,
            email: user.email,
            staff_id: user.staff_id,
            active: user.active,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
