//! Bearer-token middleware.
//!
//! Wraps the authenticated scopes:
//! 1. Extracts the `Authorization: Bearer <token>` header
//! 2. Resolves the token against the in-memory session map
//! 3. Attaches an `AuthSession` to request extensions
//! 4. Returns a 401 JSON body (with a request id) on any failure
//!
//! Handlers downstream read the caller via `crate::error::session(&req)`.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use log::warn;
use motodesk_auth::AuthService;
use motodesk_session::AuthSession;
use serde_json::json;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

/// Bearer authentication middleware factory.
pub struct BearerAuth {
    auth: Arc<AuthService>,
}

impl BearerAuth {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}

fn generate_request_id() -> String {
    format!("req_{}", nanoid::nanoid!(12))
}

fn unauthorized(req: ServiceRequest, message: &str, request_id: String) -> ServiceResponse {
    let (req, _) = req.into_parts();
    let response = HttpResponse::Unauthorized().json(json!({
        "error": "unauthorized",
        "message": message,
        "request_id": request_id
    }));
    ServiceResponse::new(req, response)
}

impl<S> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthService {
            service: Rc::new(service),
            auth: self.auth.clone(),
        }))
    }
}

pub struct BearerAuthService<S> {
    service: Rc<S>,
    auth: Arc<AuthService>,
}

impl<S> Service<ServiceRequest> for BearerAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let auth = self.auth.clone();

        Box::pin(async move {
            let request_id = generate_request_id();
            let remote_addr = req.peer_addr().map(|addr| addr.ip().to_string());

            let header = match req.headers().get("Authorization") {
                Some(header) => match header.to_str() {
                    Ok(s) => s.to_string(),
                    Err(_) => {
                        warn!(
                            "Invalid Authorization header from {:?}, request_id={}",
                            remote_addr, request_id
                        );
                        return Ok(unauthorized(
                            req,
                            "Authorization header contains invalid characters",
                            request_id,
                        ));
                    }
                },
                None => {
                    return Ok(unauthorized(
                        req,
                        "Authorization header is required. Use 'Authorization: Bearer <token>'",
                        request_id,
                    ));
                }
            };

            let token = match header.strip_prefix("Bearer ") {
                Some(token) => token.trim(),
                None => {
                    return Ok(unauthorized(
                        req,
                        "Authorization header must start with 'Bearer '",
                        request_id,
                    ));
                }
            };

            let session = match auth.sessions().resolve(token) {
                Some(session) => session,
                None => {
                    warn!(
                        "Rejected invalid or expired token from {:?}, request_id={}",
                        remote_addr, request_id
                    );
                    return Ok(unauthorized(
                        req,
                        "Invalid or expired session token",
                        request_id,
                    ));
                }
            };

            let mut auth_session = AuthSession::new(session.user_id, session.username, session.role)
                .with_request_id(request_id);
            if let Some(ip) = remote_addr {
                auth_session = auth_session.with_ip(ip);
            }
            req.extensions_mut().insert(auth_session);

            service.call(req).await
        })
    }
}
