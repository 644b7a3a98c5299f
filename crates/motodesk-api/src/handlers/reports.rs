//! Reporting endpoints.
//!
//! All reports accept optional `from`/`to` bounds, either as epoch
//! milliseconds or as ISO `YYYY-MM-DD` dates. A date lower bound means the
//! start of that day UTC, a date upper bound the end of it.

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{require, session, ApiError};
use motodesk_core::services::reports::ReportRange;
use motodesk_core::AppContext;
use motodesk_session::rbac;

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

const MILLIS_PER_DAY: i64 = 86_400_000;

fn parse_bound(raw: &str, end_of_day: bool) -> Result<i64, ApiError> {
    if let Ok(millis) = raw.parse::<i64>() {
        return Ok(millis);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ApiError::BadRequest(format!(
            "'{raw}' is not an epoch-millis timestamp or YYYY-MM-DD date"
        ))
    })?;
    let start = date
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .ok_or_else(|| ApiError::BadRequest(format!("'{raw}' is out of range")))?;
    Ok(if end_of_day {
        start + MILLIS_PER_DAY - 1
    } else {
        start
    })
}

fn parse_range(query: &RangeQuery) -> Result<ReportRange, ApiError> {
    let from = query.from.as_deref().map(|raw| parse_bound(raw, false)).transpose()?;
    let to = query.to.as_deref().map(|raw| parse_bound(raw, true)).transpose()?;
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(ApiError::BadRequest("'from' is after 'to'".to_string()));
        }
    }
    Ok(ReportRange { from, to })
}

/// GET /api/v1/reports/revenue
pub async fn revenue(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    query: web::Query<RangeQuery>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_view_reports(caller.role()), "view reports")?;
    require(rbac::can_view_financials(caller.role()), "view revenue")?;

    let report = ctx.reports.revenue(parse_range(&query)?)?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /api/v1/reports/jobs
pub async fn jobs(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    query: web::Query<RangeQuery>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_view_reports(caller.role()), "view reports")?;

    let report = ctx.reports.jobs(parse_range(&query)?)?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /api/v1/reports/attendance
pub async fn attendance(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    query: web::Query<RangeQuery>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_view_reports(caller.role()), "view reports")?;

    let report = ctx.reports.attendance(parse_range(&query)?)?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /api/v1/reports/loyalty
pub async fn loyalty(
    req: HttpRequest,
    ctx: web::Data<Arc<AppContext>>,
    query: web::Query<RangeQuery>,
) -> Result<HttpResponse, ApiError> {
    let caller = session(&req)?;
    require(rbac::can_view_reports(caller.role()), "view reports")?;

    let report = ctx.reports.loyalty(parse_range(&query)?)?;
    Ok(HttpResponse::Ok().json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bound_accepts_millis_and_dates() {
        assert_eq!(parse_bound("1700000000000", false).unwrap(), 1_700_000_000_000);
        let start = parse_bound("2024-03-01", false).unwrap();
        let end = parse_bound("2024-03-01", true).unwrap();
        assert_eq!(end - start, MILLIS_PER_DAY - 1);
    }

    #[test]
    fn test_parse_range_rejects_inverted_bounds() {
        let query = RangeQuery {
            from: Some("2024-03-02".to_string()),
            to: Some("2024-03-01".to_string()),
        };
        assert!(parse_range(&query).is_err());
    }

    #[test]
    fn test_parse_bound_rejects_junk() {
        assert!(parse_bound("yesterday", false).is_err());
    }
}
