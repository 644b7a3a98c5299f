//! Role gating and revenue redaction over HTTP.

mod common;

use common::{create_customer, create_job_card, TestServer};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_clerk_sees_no_money_fields() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;
    let clerk = ts.login_as_role(&admin, "dena", "job_card_clerk").await;

    let customer = create_customer(&ts, &admin, "Asha Rao").await;
    let card = create_job_card(&ts, &clerk, &customer, "paid_service").await;

    // Clerks can set the labor cost but never read it back
    let (status, body) = ts
        .put(
            &clerk,
            &format!("/api/v1/job-cards/{}", card),
            &json!({ "labor_cost": 1500 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("labor_cost").is_none(), "leaked: {}", body);
    assert!(body.get("cost").is_none());
    assert!(body.get("advance_payment").is_none());
    assert!(body.get("remaining_payment").is_none());

    // Managers see the full financial picture
    let manager = ts.login_as_role(&admin, "asha", "manager").await;
    let (status, body) = ts
        .get(&manager, &format!("/api/v1/job-cards/{}", card))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["labor_cost"], 1500);
    assert_eq!(body["cost"], 1500);

    ts.shutdown().await;
}

#[tokio::test]
async fn test_only_admin_manages_users() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;
    let manager = ts.login_as_role(&admin, "asha", "manager").await;

    let (status, _) = ts
        .post(
            &manager,
            "/api/v1/users",
            &json!({
                "username": "sneak",
                "full_name": "Sneak",
                "password": "Password10!",
                "role": "admin",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ts.get(&manager, "/api/v1/users").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    ts.shutdown().await;
}

#[tokio::test]
async fn test_technician_cannot_edit_job_cards_or_view_reports() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;
    let tech = ts.login_as_role(&admin, "ravi", "technician").await;

    let customer = create_customer(&ts, &admin, "Mala S").await;
    let (status, _) = ts
        .post(
            &tech,
            "/api/v1/job-cards",
            &json!({
                "customer_id": customer,
                "vehicle_registration": "KA-02-XY-2",
                "vehicle_model": "Splendor",
                "category": "repair",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ts.get(&tech, "/api/v1/reports/jobs").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Reading job cards is fine (redacted)
    let (status, _) = ts.get(&tech, "/api/v1/job-cards").await;
    assert_eq!(status, StatusCode::OK);

    ts.shutdown().await;
}

#[tokio::test]
async fn test_floor_roles_limited_to_their_statuses() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;
    let tech = ts.login_as_role(&admin, "ravi", "technician").await;

    let customer = create_customer(&ts, &admin, "Kiran B").await;
    let card = create_job_card(&ts, &admin, &customer, "repair").await;

    // Technicians may move work onto the floor
    let (status, _) = ts
        .post(
            &tech,
            &format!("/api/v1/job-cards/{}/status", card),
            &json!({ "status": "in_progress" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = ts
        .post(
            &tech,
            &format!("/api/v1/job-cards/{}/status", card),
            &json!({ "status": "completed" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Delivery is a front-office action
    let (status, _) = ts
        .post(
            &tech,
            &format!("/api/v1/job-cards/{}/status", card),
            &json!({ "status": "delivered" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    ts.shutdown().await;
}

#[tokio::test]
async fn test_manager_views_revenue_clerk_does_not() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;
    let manager = ts.login_as_role(&admin, "asha", "manager").await;
    let clerk = ts.login_as_role(&admin, "dena", "job_card_clerk").await;

    let (status, _) = ts.get(&manager, "/api/v1/reports/revenue").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ts.get(&clerk, "/api/v1/reports/revenue").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    ts.shutdown().await;
}
