//! Staff roster and attendance endpoints.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::{require, session, ApiError};
use crate::handlers::effective_limit;
use motodesk_commons::models::ids::{StaffId, UserId};
use motodesk_configs::LimitsSettings;
use motodesk_core::services::staffing::{AttendanceFilter, CreateStaff, UpdateStaff};
use motodesk_core::AppContext;
use motodesk_session::rbac;

#[derive(Debug, Deserialize)]
pub struct CreateStaffRequest {
    pub name: String,
    pub position: String,
    pub phone: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStaffRequest {
    pub name: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub user_id: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct StaffListQuery {
    pub active: Option<bool>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    pub staff_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<usize>,
}

/// GET /api/v1/staff
pub async fn list_staff(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    limits: web::Data<LimitsSettings>,
    query: web::Query<StaffListQuery>,
) -> Result<HttpResponse, ApiError> {
    session(&req)?;
    let staff = ctx
        .staffing
        .list_staff(query.active, effective_limit(query.limit, &limits))?;
    Ok(HttpResponse::Ok().json(staff))
}

/// POST /api/v1/staff
pub async fn create_staff(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    body: web::Json<CreateStaffRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_catalog(caller.role()), "manage staff")?;

    let body = body.into_inner();
    let staff = ctx.staffing.create_staff(CreateStaff {
        name: body.name,
        position: body.position,
        phone: body.phone,
        user_id: body.user_id.map(UserId::new),
    })?;
    Ok(HttpResponse::Created().json(staff))
}

/// GET /api/v1/staff/{id}
pub async fn get_staff(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    session(&req)?;
    let staff = ctx.staffing.get_staff(&StaffId::new(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(staff))
}

/// PUT /api/v1/staff/{id}
pub async fn update_staff(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
    body: web::Json<UpdateStaffRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_catalog(caller.role()), "manage staff")?;

    let body = body.into_inner();
    let staff = ctx.staffing.update_staff(
        &StaffId::new(path.into_inner()),
        UpdateStaff {
            name: body.name,
            position: body.position,
            phone: body.phone,
            user_id: body.user_id.map(UserId::new),
            active: body.active,
        },
    )?;
    Ok(HttpResponse::Ok().json(staff))
}

/// DELETE /api/v1/staff/{id}
pub async fn delete_staff(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_catalog(caller.role()), "manage staff")?;

    ctx.staffing.delete_staff(&StaffId::new(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Staff member deleted" })))
}

/// POST /api/v1/staff/{id}/attendance/check-in
pub async fn check_in(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_record_attendance(caller.role()), "record attendance")?;

    let record = ctx
        .staffing
        .check_in(&StaffId::new(path.into_inner()), &caller)?;
    Ok(HttpResponse::Created().json(record))
}

/// POST /api/v1/staff/{id}/attendance/check-out
pub async fn check_out(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_record_attendance(caller.role()), "record attendance")?;

    let record = ctx.staffing.check_out(&StaffId::new(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(record))
}

/// GET /api/v1/attendance
pub async fn list_attendance(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    limits: web::Data<LimitsSettings>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    session(&req)?;
    let query = query.into_inner();
    let records = ctx.staffing.list_attendance(AttendanceFilter {
        staff_id: query.staff_id.map(StaffId::new),
        from: query.from,
        to: query.to,
        limit: effective_limit(query.limit, &limits),
    })?;
    Ok(HttpResponse::Ok().json(records))
}
