//! Reporting endpoints: aggregates, date-range parsing and access rules.

mod common;

use common::{create_customer, create_job_card, TestServer};
use reqwest::StatusCode;
use serde_json::json;

/// Drives a repair card from pending to delivered with a labor cost.
async fn deliver_repair(ts: &TestServer, token: &str, customer_id: &str, labor: i64) -> String {
    let card = create_job_card(ts, token, customer_id, "repair").await;
    let (status, _) = ts
        .put(
            token,
            &format!("/api/v1/job-cards/{}", card),
            &json!({ "labor_cost": labor }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    for next in ["in_progress", "completed", "delivered"] {
        let (status, body) = ts
            .post(
                token,
                &format!("/api/v1/job-cards/{}/status", card),
                &json!({ "status": next }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
    }
    card
}

#[tokio::test]
async fn test_revenue_report_aggregates_delivered_jobs() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;
    let customer = create_customer(&ts, &admin, "Ravi Kumar").await;
    deliver_repair(&ts, &admin, &customer, 800).await;
    // A card still open must not count toward revenue
    create_job_card(&ts, &admin, &customer, "paid_service").await;

    let (status, body) = ts.get(&admin, "/api/v1/reports/revenue").await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["delivered_jobs"], 1);
    assert_eq!(body["total_cost"], 800);
    let by_category = body["by_category"].as_array().unwrap();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0]["category"], "repair");
    assert_eq!(by_category[0]["cost"], 800);

    ts.shutdown().await;
}

#[tokio::test]
async fn test_jobs_report_counts_by_status() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;
    let customer = create_customer(&ts, &admin, "Ravi Kumar").await;
    deliver_repair(&ts, &admin, &customer, 500).await;
    create_job_card(&ts, &admin, &customer, "paid_service").await;

    let (status, body) = ts.get(&admin, "/api/v1/reports/jobs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["delivered"], 1);
    assert!(body["average_turnaround_millis"].is_i64());
    let by_status = body["by_status"].as_array().unwrap();
    let pending = by_status
        .iter()
        .find(|row| row["status"] == "pending")
        .expect("pending bucket");
    assert_eq!(pending["count"], 1);

    ts.shutdown().await;
}

#[tokio::test]
async fn test_attendance_report_lists_staff_days() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;
    let (status, staff) = ts
        .post(
            &admin,
            "/api/v1/staff",
            &json!({ "name": "Suresh", "position": "Technician" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let staff_id = staff["id"].as_str().unwrap();
    let (status, _) = ts
        .post(
            &admin,
            &format!("/api/v1/staff/{}/attendance/check-in", staff_id),
            &json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = ts.get(&admin, "/api/v1/reports/attendance").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["staff"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Suresh");
    assert_eq!(rows[0]["days_present"], 1);

    ts.shutdown().await;
}

#[tokio::test]
async fn test_loyalty_report_movement_and_liability() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;
    let customer = create_customer(&ts, &admin, "Meena P").await;
    deliver_repair(&ts, &admin, &customer, 1000).await;
    let (status, _) = ts
        .post(
            &admin,
            &format!("/api/v1/customers/{}/loyalty/adjust", customer),
            &json!({ "delta": -200, "reason": "correction" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = ts.get(&admin, "/api/v1/reports/loyalty").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["points_issued"], 1000);
    assert_eq!(body["points_adjusted"], -200);
    assert_eq!(body["outstanding_points"], 800);

    ts.shutdown().await;
}

#[tokio::test]
async fn test_date_range_parsing() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;

    // Calendar dates and epoch millis are both accepted
    let (status, _) = ts
        .get(&admin, "/api/v1/reports/jobs?from=2026-01-01&to=2026-12-31")
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = ts
        .get(&admin, "/api/v1/reports/jobs?from=0&to=99999999999999")
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = ts.get(&admin, "/api/v1/reports/jobs?from=yesterday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    // Inverted ranges are refused outright
    let (status, _) = ts
        .get(&admin, "/api/v1/reports/jobs?from=2026-12-31&to=2026-01-01")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A range before any activity yields an empty report, not an error
    let (status, body) = ts
        .get(&admin, "/api/v1/reports/revenue?from=2000-01-01&to=2000-12-31")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["delivered_jobs"], 0);

    ts.shutdown().await;
}

#[tokio::test]
async fn test_reports_are_management_only() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;
    let tech = ts.login_as_role(&admin, "kiran", "technician").await;

    for path in [
        "/api/v1/reports/revenue",
        "/api/v1/reports/jobs",
        "/api/v1/reports/attendance",
        "/api/v1/reports/loyalty",
    ] {
        let (status, _) = ts.get(&tech, path).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", path);
    }

    ts.shutdown().await;
}
