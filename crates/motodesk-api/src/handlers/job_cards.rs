//! Job card endpoints: CRUD, workflow, assignment, line items and audit.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::{require, session, ApiError};
use crate::handlers::effective_limit;
use crate::models::JobCardResponse;
use motodesk_commons::models::ids::{BayId, CustomerId, JobCardId, PartId, StaffId};
use motodesk_commons::{JobStatus, ServiceCategory};
use motodesk_configs::LimitsSettings;
use motodesk_core::services::job_cards::{AssignJob, CreateJobCard, JobCardFilter, UpdateJobCard};
use motodesk_core::AppContext;
use motodesk_session::rbac;

#[derive(Debug, Deserialize)]
pub struct CreateJobCardRequest {
    pub customer_id: String,
    pub vehicle_registration: String,
    pub vehicle_model: String,
    pub category: ServiceCategory,
    pub description: Option<String>,
    pub odometer_km: Option<u32>,
    #[serde(default)]
    pub advance_payment: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateJobCardRequest {
    pub description: Option<String>,
    pub odometer_km: Option<u32>,
    pub labor_cost: Option<i64>,
    pub advance_payment: Option<i64>,
    pub photo_refs: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: JobStatus,
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub bay_id: Option<String>,
    pub technician_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddLineItemRequest {
    pub part_id: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct JobCardListQuery {
    pub customer_id: Option<String>,
    pub status: Option<JobStatus>,
    pub category: Option<ServiceCategory>,
    pub bay_id: Option<String>,
    pub technician_id: Option<String>,
    pub limit: Option<usize>,
}

/// GET /api/v1/job-cards
pub async fn list_job_cards(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    limits: web::Data<LimitsSettings>,
    query: web::Query<JobCardListQuery>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    let query = query.into_inner();
    let filter = JobCardFilter {
        customer_id: query.customer_id.map(CustomerId::new),
        status: query.status,
        category: query.category,
        bay_id: query.bay_id.map(BayId::new),
        technician_id: query.technician_id.map(StaffId::new),
        limit: effective_limit(query.limit, &limits),
    };
    let cards: Vec<JobCardResponse> = ctx
        .job_cards
        .list(filter)?
        .into_iter()
        .map(|c| JobCardResponse::from_card(c, caller.role()))
        .collect();
    Ok(HttpResponse::Ok().json(cards))
}

/// POST /api/v1/job-cards
pub async fn create_job_card(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    body: web::Json<CreateJobCardRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_edit_job_cards(caller.role()), "create job cards")?;

    let body = body.into_inner();
    let card = ctx.job_cards.create(
        CreateJobCard {
            customer_id: CustomerId::new(body.customer_id),
            vehicle_registration: body.vehicle_registration,
            vehicle_model: body.vehicle_model,
            category: body.category,
            description: body.description,
            odometer_km: body.odometer_km,
            advance_payment: body.advance_payment,
        },
        &caller,
    )?;
    Ok(HttpResponse::Created().json(JobCardResponse::from_card(card, caller.role())))
}

/// GET /api/v1/job-cards/{id}
pub async fn get_job_card(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    let card = ctx.job_cards.get(&JobCardId::new(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(JobCardResponse::from_card(card, caller.role())))
}

/// PUT /api/v1/job-cards/{id}
pub async fn update_job_card(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
    body: web::Json<UpdateJobCardRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_edit_job_cards(caller.role()), "edit job cards")?;

    let body = body.into_inner();
    let card = ctx.job_cards.update(
        &JobCardId::new(path.into_inner()),
        UpdateJobCard {
            description: body.description,
            odometer_km: body.odometer_km,
            labor_cost: body.labor_cost,
            advance_payment: body.advance_payment,
            photo_refs: body.photo_refs,
        },
        &caller,
    )?;
    Ok(HttpResponse::Ok().json(JobCardResponse::from_card(card, caller.role())))
}

/// DELETE /api/v1/job-cards/{id}
pub async fn delete_job_card(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_delete_job_cards(caller.role()), "delete job cards")?;

    ctx.job_cards.delete(&JobCardId::new(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Job card deleted" })))
}

/// POST /api/v1/job-cards/{id}/status
pub async fn set_status(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
    body: web::Json<SetStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    // Role gate first: floor roles get a 403 for statuses beyond their
    // reach even when the transition itself would be legal.
    require(
        rbac::can_set_job_status(caller.role(), body.status),
        "set this job status",
    )?;

    let card = ctx
        .job_cards
        .set_status(&JobCardId::new(path.into_inner()), body.status, &caller)?;
    Ok(HttpResponse::Ok().json(JobCardResponse::from_card(card, caller.role())))
}

/// POST /api/v1/job-cards/{id}/assign
pub async fn assign(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
    body: web::Json<AssignRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_edit_job_cards(caller.role()), "assign job cards")?;

    let body = body.into_inner();
    let card = ctx.job_cards.assign(
        &JobCardId::new(path.into_inner()),
        AssignJob {
            bay_id: body.bay_id.map(BayId::new),
            technician_id: body.technician_id.map(StaffId::new),
        },
        &caller,
    )?;
    Ok(HttpResponse::Ok().json(JobCardResponse::from_card(card, caller.role())))
}

/// POST /api/v1/job-cards/{id}/line-items
pub async fn add_line_item(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
    body: web::Json<AddLineItemRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_edit_job_cards(caller.role()), "edit job cards")?;

    let card = ctx.job_cards.add_line_item(
        &JobCardId::new(path.into_inner()),
        &PartId::new(body.part_id.clone()),
        body.quantity,
        &caller,
    )?;
    Ok(HttpResponse::Ok().json(JobCardResponse::from_card(card, caller.role())))
}

/// DELETE /api/v1/job-cards/{id}/line-items/{part_id}
pub async fn remove_line_item(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_edit_job_cards(caller.role()), "edit job cards")?;

    let (id, part_id) = path.into_inner();
    let card = ctx.job_cards.remove_line_item(
        &JobCardId::new(id),
        &PartId::new(part_id),
        &caller,
    )?;
    Ok(HttpResponse::Ok().json(JobCardResponse::from_card(card, caller.role())))
}

/// GET /api/v1/job-cards/{id}/audit
pub async fn audit_trail(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    limits: web::Data<LimitsSettings>,
    path: web::Path<String>,
    query: web::Query<crate::handlers::LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_view_audit(caller.role()), "view audit trails")?;

    let entries = ctx.job_cards.audit_trail(
        &JobCardId::new(path.into_inner()),
        effective_limit(query.limit, &limits),
    )?;
    Ok(HttpResponse::Ok().json(entries))
}
