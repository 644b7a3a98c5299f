//! Logout handler
//!
//! POST /api/auth/logout - Revokes the caller's bearer token

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use std::sync::Arc;

use crate::error::ApiError;
use motodesk_auth::AuthService;

/// POST /api/auth/logout
///
/// Revokes the presented token. Idempotent: revoking an already-dead token
/// still returns 200 (the middleware rejected truly invalid ones upstream).
pub async fn logout_handler(
    req: HttpRequest,
    auth: web::Data<Arc<AuthService>>,
) -> Result<HttpResponse, ApiError> {
    if let Some(token) = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        auth.logout(token.trim());
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Logged out" })))
}
