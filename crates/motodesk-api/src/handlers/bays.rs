//! Bay registry endpoints.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::{require, session, ApiError};
use crate::handlers::effective_limit;
use motodesk_commons::models::ids::BayId;
use motodesk_commons::BayKind;
use motodesk_configs::LimitsSettings;
use motodesk_core::services::bays::UpdateBay;
use motodesk_core::AppContext;
use motodesk_session::rbac;

#[derive(Debug, Deserialize)]
pub struct CreateBayRequest {
    pub name: String,
    pub kind: BayKind,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBayRequest {
    pub name: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct BayListQuery {
    pub active: Option<bool>,
    pub limit: Option<usize>,
}

/// GET /api/v1/bays
pub async fn list_bays(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    limits: web::Data<LimitsSettings>,
    query: web::Query<BayListQuery>,
) -> Result<HttpResponse, ApiError> {
    session(&req)?;
    let bays = ctx
        .bays
        .list(query.active, effective_limit(query.limit, &limits))?;
    Ok(HttpResponse::Ok().json(bays))
}

/// POST /api/v1/bays
pub async fn create_bay(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    body: web::Json<CreateBayRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_catalog(caller.role()), "manage bays")?;

    let bay = ctx.bays.create(&body.name, body.kind)?;
    Ok(HttpResponse::Created().json(bay))
}

/// GET /api/v1/bays/{id}
pub async fn get_bay(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    session(&req)?;
    let bay = ctx.bays.get(&BayId::new(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(bay))
}

/// PUT /api/v1/bays/{id}
pub async fn update_bay(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
    body: web::Json<UpdateBayRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_catalog(caller.role()), "manage bays")?;

    let body = body.into_inner();
    let bay = ctx.bays.update(
        &BayId::new(path.into_inner()),
        UpdateBay {
            name: body.name,
            active: body.active,
        },
    )?;
    Ok(HttpResponse::Ok().json(bay))
}

/// DELETE /api/v1/bays/{id}
pub async fn delete_bay(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_catalog(caller.role()), "manage bays")?;

    ctx.bays.delete(&BayId::new(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Bay deleted" })))
}
