//! Global job audit feed.

use actix_web::{web, HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::error::{require, session, ApiError};
use crate::handlers::{effective_limit, LimitQuery};
use motodesk_configs::LimitsSettings;
use motodesk_core::AppContext;
use motodesk_session::rbac;

/// GET /api/v1/audit
pub async fn list_audit(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    limits: web::Data<LimitsSettings>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_view_audit(caller.role()), "view the audit trail")?;

    let entries = ctx
        .job_cards
        .list_audit(effective_limit(query.limit, &limits))?;
    Ok(HttpResponse::Ok().json(entries))
}
