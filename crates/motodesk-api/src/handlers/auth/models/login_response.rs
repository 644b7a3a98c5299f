//! Login response model

use serde::Serialize;

use super::UserInfo;

/// Response body for a successful login: the bearer token, its expiry and
/// the authenticated user.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Session expiry, epoch millis.
    pub expires_at: i64,
    pub user: UserInfo,
}
