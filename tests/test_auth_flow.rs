//! End-to-end authentication flow over HTTP.

mod common;

use common::TestServer;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health_is_public() {
    let ts = TestServer::start().await;

    let resp = reqwest::get(ts.url("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());

    ts.shutdown().await;
}

#[tokio::test]
async fn test_login_logout_me() {
    let ts = TestServer::start().await;

    let token = ts.login_admin().await;

    let (status, body) = ts.get(&token, "/api/auth/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "admin");
    assert_eq!(body["role"], "admin");
    // Password material never leaves the server
    assert!(body.get("password_hash").is_none());

    let (status, _) = ts.post(&token, "/api/auth/logout", &json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ts.get(&token, "/api/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    ts.shutdown().await;
}

#[tokio::test]
async fn test_wrong_password_is_generic_401() {
    let ts = TestServer::start().await;

    let (status, body) = ts
        .post_raw(
            "/api/auth/login",
            &json!({ "username": "admin", "password": "nope" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password");

    // Unknown usernames produce the identical message
    let (status, body) = ts
        .post_raw(
            "/api/auth/login",
            &json!({ "username": "ghost", "password": "nope" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password");

    ts.shutdown().await;
}

#[tokio::test]
async fn test_lockout_after_repeated_failures() {
    let ts = TestServer::start().await;
    let admin = ts.login_admin().await;
    ts.login_as_role(&admin, "ravi", "technician").await;

    for _ in 0..5 {
        let (status, _) = ts
            .post_raw(
                "/api/auth/login",
                &json!({ "username": "ravi", "password": "wrong" }),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // Correct password is now rejected with a lockout message
    let (status, body) = ts
        .post_raw(
            "/api/auth/login",
            &json!({ "username": "ravi", "password": "RolePassword10!" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(
        body["message"].as_str().unwrap().contains("Too many failed attempts"),
        "unexpected message: {}",
        body
    );

    ts.shutdown().await;
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let ts = TestServer::start().await;

    let resp = reqwest::get(ts.url("/api/v1/job-cards")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "unauthorized");
    assert!(body["request_id"].is_string());

    let (status, _) = ts.get("garbage-token", "/api/v1/job-cards").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    ts.shutdown().await;
}
