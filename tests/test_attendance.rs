//! Staff attendance over HTTP.

mod common;

use common::TestServer;
use reqwest::StatusCode;
use serde_json::json;

async fn create_staff(ts: &TestServer, token: &str, name: &str) -> String {
    let (status, body) = ts
        .post(
            token,
            "/api/v1/staff",
            &json!({ "name": name, "position": "Service Staff" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_check_in_then_out() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;
    let staff = create_staff(&ts, &admin, "Mala S").await;

    let (status, body) = ts
        .post(
            &admin,
            &format!("/api/v1/staff/{}/attendance/check-in", staff),
            &json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert!(body["check_out_at"].is_null());

    // Second check-in on the same day is a conflict
    let (status, _) = ts
        .post(
            &admin,
            &format!("/api/v1/staff/{}/attendance/check-in", staff),
            &json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = ts
        .post(
            &admin,
            &format!("/api/v1/staff/{}/attendance/check-out", staff),
            &json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["check_out_at"].is_i64());

    // Checking out twice is a conflict too
    let (status, _) = ts
        .post(
            &admin,
            &format!("/api/v1/staff/{}/attendance/check-out", staff),
            &json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    ts.shutdown().await;
}

#[tokio::test]
async fn test_check_out_requires_open_record() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;
    let staff = create_staff(&ts, &admin, "Ravi K").await;

    let (status, _) = ts
        .post(
            &admin,
            &format!("/api/v1/staff/{}/attendance/check-out", staff),
            &json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    ts.shutdown().await;
}

#[tokio::test]
async fn test_attendance_role_gate() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;
    let staff = create_staff(&ts, &admin, "Mala S").await;

    let service_staff = ts.login_as_role(&admin, "mala", "service_staff").await;
    let tech = ts.login_as_role(&admin, "ravi", "technician").await;

    let (status, _) = ts
        .post(
            &tech,
            &format!("/api/v1/staff/{}/attendance/check-in", staff),
            &json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ts
        .post(
            &service_staff,
            &format!("/api/v1/staff/{}/attendance/check-in", staff),
            &json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    ts.shutdown().await;
}

#[tokio::test]
async fn test_inactive_staff_cannot_check_in() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;
    let staff = create_staff(&ts, &admin, "Kiran B").await;

    let (status, _) = ts
        .put(
            &admin,
            &format!("/api/v1/staff/{}", staff),
            &json!({ "active": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ts
        .post(
            &admin,
            &format!("/api/v1/staff/{}/attendance/check-in", staff),
            &json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    ts.shutdown().await;
}

#[tokio::test]
async fn test_list_attendance_filters_by_staff() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;
    let mala = create_staff(&ts, &admin, "Mala S").await;
    let ravi = create_staff(&ts, &admin, "Ravi K").await;

    for staff in [&mala, &ravi] {
        let (status, _) = ts
            .post(
                &admin,
                &format!("/api/v1/staff/{}/attendance/check-in", staff),
                &json!({}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = ts.get(&admin, "/api/v1/attendance").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = ts
        .get(&admin, &format!("/api/v1/attendance?staff_id={}", mala))
        .await;
    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["staff_id"], mala.as_str());

    ts.shutdown().await;
}
