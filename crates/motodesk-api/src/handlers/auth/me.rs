//! Current user handler
//!
//! GET /api/auth/me - Returns the currently authenticated user

use actix_web::{web, HttpRequest, HttpResponse};
use std::sync::Arc;

use super::models::UserInfo;
use crate::error::{session, ApiError};
use motodesk_auth::AuthService;

/// GET /api/auth/me
pub async fn me_handler(
    req: HttpRequest,
    auth: web::Data<Arc<AuthService>>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    let user = auth
        .users()
        .get_by_id(caller.user_id())
        .map_err(ApiError::from)?
        .filter(|u| !u.is_deleted())
        .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserInfo::from(user)))
}
