//! HTTP error mapping.
//!
//! Domain and auth errors funnel into `ApiError`, which renders the uniform
//! `{"error": "<code>", "message": "<text>"}` body. Login-path auth errors
//! collapse into one generic message so usernames cannot be probed.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, HttpMessage, ResponseError};
use serde::Serialize;
use std::fmt;

use motodesk_auth::AuthError;
use motodesk_core::ServiceError;
use motodesk_session::AuthSession;

/// Uniform error body for every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::Internal(_) => "internal_error",
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m)
            | ApiError::Unauthorized(m)
            | ApiError::Forbidden(m)
            | ApiError::NotFound(m)
            | ApiError::Conflict(m)
            | ApiError::Internal(m) => m,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self, ApiError::Internal(_)) {
            log::error!("Internal error on request: {}", self.message());
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.code().to_string(),
            message: self.message().to_string(),
            request_id: None,
        })
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(m) => ApiError::BadRequest(m),
            ServiceError::NotFound(m) => ApiError::NotFound(m),
            ServiceError::Conflict(m) => ApiError::Conflict(m),
            ServiceError::PermissionDenied(m) => ApiError::Forbidden(m),
            ServiceError::Storage(e) => ApiError::Internal(e.to_string()),
            ServiceError::Internal(m) => ApiError::Internal(m),
        }
    }
}

/// Credential-shaped failures all become the same 401 so responses do not
/// reveal whether the username exists.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials(_)
            | AuthError::UserNotFound(_)
            | AuthError::AccountDisabled
            | AuthError::InvalidToken => {
                ApiError::Unauthorized("Invalid username or password".to_string())
            }
            AuthError::AccountLocked(m) => ApiError::Unauthorized(m),
            AuthError::UsernameTaken(m) => ApiError::Conflict(format!("Username already taken: {}", m)),
            AuthError::WeakPassword(m) => ApiError::BadRequest(m),
            AuthError::HashingError(m) | AuthError::StorageError(m) => ApiError::Internal(m),
        }
    }
}

/// The caller's session, put there by the bearer middleware.
pub fn session(req: &HttpRequest) -> Result<AuthSession, ApiError> {
    req.extensions()
        .get::<AuthSession>()
        .cloned()
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
}

/// Map a failed capability check to a 403.
pub fn require(allowed: bool, capability: &str) -> Result<(), ApiError> {
    if allowed {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "Your role cannot {}",
            capability
        )))
    }
}
