//! Rewards catalog and redemption endpoints.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{require, session, ApiError};
use crate::handlers::effective_limit;
use motodesk_commons::models::ids::{CustomerId, RedemptionId, RewardId};
use motodesk_commons::RedemptionStatus;
use motodesk_configs::LimitsSettings;
use motodesk_core::services::loyalty::{CreateReward, RedemptionFilter, UpdateReward};
use motodesk_core::AppContext;
use motodesk_session::rbac;

#[derive(Debug, Deserialize)]
pub struct CreateRewardRequest {
    pub name: String,
    pub description: Option<String>,
    pub points_cost: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRewardRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub points_cost: Option<i64>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct RewardListQuery {
    pub active: Option<bool>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RedeemRequest {
    pub customer_id: String,
    pub reward_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RedemptionListQuery {
    pub customer_id: Option<String>,
    pub status: Option<RedemptionStatus>,
    pub limit: Option<usize>,
}

/// GET /api/v1/rewards
pub async fn list_rewards(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    limits: web::Data<LimitsSettings>,
    query: web::Query<RewardListQuery>,
) -> Result<HttpResponse, ApiError> {
    session(&req)?;
    let rewards = ctx
        .loyalty
        .list_rewards(query.active, effective_limit(query.limit, &limits))?;
    Ok(HttpResponse::Ok().json(rewards))
}

/// POST /api/v1/rewards
pub async fn create_reward(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    body: web::Json<CreateRewardRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_catalog(caller.role()), "manage rewards")?;

    let body = body.into_inner();
    let reward = ctx.loyalty.create_reward(CreateReward {
        name: body.name,
        description: body.description,
        points_cost: body.points_cost,
    })?;
    Ok(HttpResponse::Created().json(reward))
}

/// GET /api/v1/rewards/{id}
pub async fn get_reward(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    session(&req)?;
    let reward = ctx.loyalty.get_reward(&RewardId::new(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(reward))
}

/// PUT /api/v1/rewards/{id}
pub async fn update_reward(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
    body: web::Json<UpdateRewardRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_catalog(caller.role()), "manage rewards")?;

    let body = body.into_inner();
    let reward = ctx.loyalty.update_reward(
        &RewardId::new(path.into_inner()),
        UpdateReward {
            name: body.name,
            description: body.description,
            points_cost: body.points_cost,
            active: body.active,
        },
    )?;
    Ok(HttpResponse::Ok().json(reward))
}

/// DELETE /api/v1/rewards/{id}
pub async fn delete_reward(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_manage_catalog(caller.role()), "manage rewards")?;

    ctx.loyalty.delete_reward(&RewardId::new(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Reward deleted" })))
}

/// POST /api/v1/redemptions
pub async fn create_redemption(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    body: web::Json<RedeemRequest>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(
        rbac::can_create_redemptions(caller.role()),
        "redeem rewards",
    )?;

    let body = body.into_inner();
    let redemption = ctx.loyalty.redeem(
        &CustomerId::new(body.customer_id),
        &RewardId::new(body.reward_id),
        &caller,
    )?;
    Ok(HttpResponse::Created().json(redemption))
}

/// GET /api/v1/redemptions
pub async fn list_redemptions(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    limits: web::Data<LimitsSettings>,
    query: web::Query<RedemptionListQuery>,
) -> Result<HttpResponse, ApiError> {
    session(&req)?;
    let query = query.into_inner();
    let redemptions = ctx.loyalty.list_redemptions(RedemptionFilter {
        customer_id: query.customer_id.map(CustomerId::new),
        status: query.status,
        limit: effective_limit(query.limit, &limits),
    })?;
    Ok(HttpResponse::Ok().json(redemptions))
}

/// GET /api/v1/redemptions/{id}
pub async fn get_redemption(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    session(&req)?;
    let redemption = ctx
        .loyalty
        .get_redemption(&RedemptionId::new(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(redemption))
}

/// POST /api/v1/redemptions/{id}/fulfill
pub async fn fulfill_redemption(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(
        rbac::can_resolve_redemptions(caller.role()),
        "resolve redemptions",
    )?;

    let redemption = ctx
        .loyalty
        .fulfill_redemption(&RedemptionId::new(path.into_inner()), &caller)?;
    Ok(HttpResponse::Ok().json(redemption))
}

/// POST /api/v1/redemptions/{id}/cancel
pub async fn cancel_redemption(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(
        rbac::can_resolve_redemptions(caller.role()),
        "resolve redemptions",
    )?;

    let redemption = ctx
        .loyalty
        .cancel_redemption(&RedemptionId::new(path.into_inner()), &caller)?;
    Ok(HttpResponse::Ok().json(redemption))
}
