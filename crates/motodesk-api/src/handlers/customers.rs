//! Customer registry and loyalty endpoints.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{require, session, ApiError};
use crate::handlers::{effective_limit, LimitQuery};
use motodesk_commons::models::ids::CustomerId;
use motodesk_commons::types::Customer;
use motodesk_commons::LoyaltyTier;
use motodesk_configs::LimitsSettings;
use motodesk_core::services::loyalty::{CreateCustomer, UpdateCustomer};
use motodesk_core::AppContext;
use motodesk_session::rbac;

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CustomerListQuery {
    pub search: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct AdjustPointsRequest {
    pub delta: i64,
    pub reason: String,
}

/// Loyalty standing for a single customer.
#[derive(Debug, Serialize)]
pub struct LoyaltySummary {
    pub customer_id: CustomerId,
    pub name: String,
    pub tier: LoyaltyTier,
    pub multiplier: f64,
    pub available_points: i64,
    pub lifetime_points: i64,
}

impl From<Customer> for LoyaltySummary {
    fn from(customer: Customer) -> Self {
        let tier = customer.tier();
        Self {
            customer_id: customer.id,
            name: customer.name,
            tier,
            multiplier: tier.multiplier(),
            available_points: customer.available_points,
            lifetime_points: customer.lifetime_points,
        }
    }
}

/// GET /api/v1/customers
pub async fn list_customers(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    limits: web::Data<LimitsSettings>,
    query: web::Query<CustomerListQuery>,
) -> Result<HttpResponse, ApiError> {
    session(&req)?;
    let customers = ctx.loyalty.list_customers(
        query.search.as_deref(),
        effective_limit(query.limit, &limits),
    )?;
    Ok(HttpResponse::Ok().json(customers))
}

/// POST /api/v1/customers
pub async fn create_customer(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    body: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_create_customers(caller.role()), "create customers")?;

    let body = body.into_inner();
    let customer = ctx.loyalty.create_customer(CreateCustomer {
        name: body.name,
        phone: body.phone,
        email: body.email,
    })?;
    Ok(HttpResponse::Created().json(customer))
}

/// GET /api/v1/customers/{id}
pub async fn get_customer(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    session(&req)?;
    let customer = ctx
        .loyalty
        .get_customer(&CustomerId::new(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(customer))
}

/// PUT /api/v1/customers/{id}
pub async fn update_customer(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
    body: web::Json<UpdateCustomerRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_create_customers(caller.role()), "edit customers")?;

    let body = body.into_inner();
    let customer = ctx.loyalty.update_customer(
        &CustomerId::new(path.into_inner()),
        UpdateCustomer {
            name: body.name,
            phone: body.phone,
            email: body.email,
        },
    )?;
    Ok(HttpResponse::Ok().json(customer))
}

/// GET /api/v1/customers/{id}/loyalty
pub async fn loyalty_summary(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    session(&req)?;
    let customer = ctx
        .loyalty
        .get_customer(&CustomerId::new(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(LoyaltySummary::from(customer)))
}

/// POST /api/v1/customers/{id}/loyalty/adjust
pub async fn adjust_points(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
    body: web::Json<AdjustPointsRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_adjust_points(caller.role()), "adjust points")?;

    let entry = ctx.loyalty.adjust(
        &CustomerId::new(path.into_inner()),
        body.delta,
        &body.reason,
        &caller,
    )?;
    Ok(HttpResponse::Created().json(entry))
}

/// GET /api/v1/customers/{id}/points-history
pub async fn points_history(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    limits: web::Data<LimitsSettings>,
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    session(&req)?;
    let entries = ctx.loyalty.points_history(
        &CustomerId::new(path.into_inner()),
        effective_limit(query.limit, &limits),
    )?;
    Ok(HttpResponse::Ok().json(entries))
}
