//! Parts catalog and stock endpoints.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::{require, session, ApiError};
use crate::handlers::effective_limit;
use motodesk_commons::models::ids::PartId;
use motodesk_configs::LimitsSettings;
use motodesk_core::services::parts::{CreatePart, PartFilter, UpdatePart};
use motodesk_core::AppContext;
use motodesk_session::rbac;

#[derive(Debug, Deserialize)]
pub struct CreatePartRequest {
    pub part_number: String,
    pub name: String,
    pub category: Option<String>,
    pub unit_price: i64,
    #[serde(default)]
    pub stock_quantity: u32,
    pub reorder_level: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePartRequest {
    pub part_number: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit_price: Option<i64>,
    pub reorder_level: Option<u32>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PartListQuery {
    pub active: Option<bool>,
    #[serde(default)]
    pub low_stock: bool,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct StockAdjustRequest {
    /// Signed change to on-hand quantity. Negative values consume stock.
    pub delta: i64,
}

/// GET /api/v1/parts
pub async fn list_parts(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    limits: web::Data<LimitsSettings>,
    query: web::Query<PartListQuery>,
) -> Result<HttpResponse, ApiError> {
    session(&req)?;
    let parts = ctx.parts.list(PartFilter {
        active: query.active,
        low_stock: query.low_stock,
        limit: effective_limit(query.limit, &limits),
    })?;
    Ok(HttpResponse::Ok().json(parts))
}

/// POST /api/v1/parts
pub async fn create_part(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    body: web::Json<CreatePartRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_catalog(caller.role()), "manage parts")?;

    let body = body.into_inner();
    let part = ctx.parts.create(CreatePart {
        part_number: body.part_number,
        name: body.name,
        category: body.category,
        unit_price: body.unit_price,
        stock_quantity: body.stock_quantity,
        reorder_level: body.reorder_level,
    })?;
    Ok(HttpResponse::Created().json(part))
}

/// GET /api/v1/parts/{id}
pub async fn get_part(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    session(&req)?;
    let part = ctx.parts.get(&PartId::new(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(part))
}

/// PUT /api/v1/parts/{id}
pub async fn update_part(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
    body: web::Json<UpdatePartRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_catalog(caller.role()), "manage parts")?;

    let body = body.into_inner();
    let part = ctx.parts.update(
        &PartId::new(path.into_inner()),
        UpdatePart {
            part_number: body.part_number,
            name: body.name,
            category: body.category,
            unit_price: body.unit_price,
            reorder_level: body.reorder_level,
            active: body.active,
        },
    )?;
    Ok(HttpResponse::Ok().json(part))
}

/// DELETE /api/v1/parts/{id}
pub async fn delete_part(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_catalog(caller.role()), "manage parts")?;

    ctx.parts.delete(&PartId::new(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Part deleted" })))
}

/// POST /api/v1/parts/{id}/stock
pub async fn adjust_stock(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
    body: web::Json<StockAdjustRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_catalog(caller.role()), "manage parts")?;

    let part = ctx
        .parts
        .adjust_stock(&PartId::new(path.into_inner()), body.delta)?;
    Ok(HttpResponse::Ok().json(part))
}
