//! Login handler
//!
//! POST /api/auth/login - Authenticates a user and returns a bearer token

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use super::models::{LoginRequest, LoginResponse, UserInfo};
use crate::error::ApiError;
use motodesk_auth::AuthService;

/// POST /api/auth/login
///
/// Verifies the credentials and issues an opaque bearer token. Every
/// credential-shaped failure returns the same generic 401; lockout is the
/// one exception and says so.
pub async fn login_handler(
    auth: web::Data<Arc<AuthService>>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let (user, token, session) = auth.login(&body.username, &body.password).await?;

    log::info!("User '{}' logged in ({})", user.username, user.role);
    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        expires_at: session.expires_at,
        user: UserInfo::from(user),
    }))
}
