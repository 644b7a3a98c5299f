//! Login-account administration.
//!
//! All of /api/v1/users is Admin-only except password change, which a user
//! may do for their own account with current-password proof.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::{require, session, ApiError};
use crate::handlers::{effective_limit, LimitQuery};
use crate::handlers::auth::models::UserInfo;
use motodesk_auth::AuthService;
use motodesk_commons::models::ids::UserId;
use motodesk_commons::models::Role;
use motodesk_configs::LimitsSettings;
use motodesk_session::rbac;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub role: Role,
    pub email: Option<String>,
    pub staff_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub email: Option<String>,
    pub staff_id: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub new_password: String,
    /// Required for self-service; ignored when an Admin resets another
    /// account.
    pub current_password: Option<String>,
}

/// GET /api/v1/users
pub async fn list_users(
    req: HttpRequest,
    auth: web::Data<Arc<AuthService>>,
    limits: web::Data<LimitsSettings>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_users(caller.role()), "manage users")?;

    let limit = effective_limit(query.limit, &limits);
    let users: Vec<UserInfo> = auth
        .users()
        .list_users(limit)
        .map_err(ApiError::from)?
        .into_iter()
        .map(UserInfo::from)
        .collect();
    Ok(HttpResponse::Ok().json(users))
}

/// POST /api/v1/users
pub async fn create_user(
    req: HttpRequest,
    auth: web::Data<Arc<AuthService>>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_users(caller.role()), "manage users")?;

    let mut user = auth
        .create_user(&body.username, &body.full_name, &body.password, body.role)
        .await?;
    if body.email.is_some() || body.staff_id.is_some() {
        user.email = body.email.clone();
        user.staff_id = body.staff_id.clone().map(Into::into);
        auth.users().update_user(&user).map_err(ApiError::from)?;
    }

    log::info!("User '{}' created with role {}", user.username, user.role);
    Ok(HttpResponse::Created().json(UserInfo::from(user)))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    req: HttpRequest,
    auth: web::Data<Arc<AuthService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_users(caller.role()), "manage users")?;

    let id = UserId::new(path.into_inner());
    let user = auth
        .users()
        .get_by_id(&id)
        .map_err(ApiError::from)?
        .filter(|u| !u.is_deleted())
        .ok_or_else(|| ApiError::NotFound(format!("user {}", id)))?;
    Ok(HttpResponse::Ok().json(UserInfo::from(user)))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    req: HttpRequest,
    auth: web::Data<Arc<AuthService>>,
    path: web::Path<String>,
    body: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_users(caller.role()), "manage users")?;

    let id = UserId::new(path.into_inner());
    let mut user = auth
        .users()
        .get_by_id(&id)
        .map_err(ApiError::from)?
        .filter(|u| !u.is_deleted())
        .ok_or_else(|| ApiError::NotFound(format!("user {}", id)))?;

    let body = body.into_inner();
    if let Some(full_name) = body.full_name {
        user.full_name = full_name;
    }
    if let Some(role) = body.role {
        user.role = role;
    }
    if let Some(email) = body.email {
        user.email = Some(email);
    }
    if let Some(staff_id) = body.staff_id {
        user.staff_id = Some(staff_id.into());
    }
    if let Some(active) = body.active {
        user.active = active;
        if !active {
            // Deactivation takes effect immediately, not at next login
            auth.sessions().revoke_all_for(&user.id);
        }
    }
    user.updated_at = chrono::Utc::now().timestamp_millis();
    auth.users().update_user(&user).map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(UserInfo::from(user)))
}

/// DELETE /api/v1/users/{id} (soft delete)
pub async fn delete_user(
    req: HttpRequest,
    auth: web::Data<Arc<AuthService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_users(caller.role()), "manage users")?;

    let id = UserId::new(path.into_inner());
    if &id == caller.user_id() {
        return Err(ApiError::Conflict(
            "You cannot delete your own account".to_string(),
        ));
    }
    let user = auth.users().soft_delete(&id).map_err(ApiError::from)?;
    auth.sessions().revoke_all_for(&id);
    log::info!("User '{}' soft-deleted", user.username);
    Ok(HttpResponse::Ok().json(json!({ "message": "User deleted" })))
}

/// POST /api/v1/users/{id}/password
pub async fn change_password(
    req: HttpRequest,
    auth: web::Data<Arc<AuthService>>,
    path: web::Path<String>,
    body: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    let id = UserId::new(path.into_inner());
    let own_account = &id == caller.user_id();

    if own_account {
        let current = body.current_password.as_deref().ok_or_else(|| {
            ApiError::bad_request("current_password is required to change your own password")
        })?;
        auth.change_password(&id, &body.new_password, Some(current))
            .await?;
    } else {
        require(rbac::can_manage_users(caller.role()), "manage users")?;
        auth.change_password(&id, &body.new_password, None).await?;
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Password changed" })))
}
