//! Shared harness for HTTP integration tests.
//!
//! Boots the full server (real middleware stack, real routes) on an
//! ephemeral port with a fresh in-memory store per test.

use reqwest::StatusCode;
use serde_json::{json, Value};

use motodesk_configs::ServerConfig;
use motodesk_server::lifecycle::{self, RunningTestHttpServer};

pub const ADMIN_PASSWORD: &str = "test-admin-pass";

pub struct TestServer {
    pub server: RunningTestHttpServer,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn start() -> Self {
        let mut config = ServerConfig::default();
        config.server.workers = 1;
        config.auth.bcrypt_cost = 4; // keep tests fast
        config.auth.default_admin_password = Some(ADMIN_PASSWORD.to_string());

        let components = lifecycle::bootstrap(&config)
            .await
            .expect("bootstrap failed");
        let server = lifecycle::run_for_tests(&config, components)
            .await
            .expect("server failed to start");

        Self {
            server,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.server.base_url, path)
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .post_raw(
                "/api/auth/login",
                &json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().expect("token missing").to_string()
    }

    pub async fn login_admin(&self) -> String {
        self.login("admin", ADMIN_PASSWORD).await
    }

    /// Create a login account with the given role and return a bearer token
    /// for it. Requires an admin token.
    pub async fn login_as_role(&self, admin_token: &str, username: &str, role: &str) -> String {
        let password = "RolePassword10!";
        let (status, body) = self
            .post(
                admin_token,
                "/api/v1/users",
                &json!({
                    "username": username,
                    "full_name": username,
                    "password": password,
                    "role": role,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "user create failed: {}", body);
        self.login(username, password).await
    }

    pub async fn post_raw(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("request failed");
        let status = resp.status();
        let body = resp.json().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(&self, token: &str, path: &str) -> (StatusCode, Value) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("request failed");
        let status = resp.status();
        let body = resp.json().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn post(&self, token: &str, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("request failed");
        let status = resp.status();
        let body = resp.json().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn put(&self, token: &str, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("request failed");
        let status = resp.status();
        let body = resp.json().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn delete(&self, token: &str, path: &str) -> (StatusCode, Value) {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("request failed");
        let status = resp.status();
        let body = resp.json().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn shutdown(self) {
        self.server.shutdown().await;
    }
}

/// Create a customer and return its id.
pub async fn create_customer(ts: &TestServer, token: &str, name: &str) -> String {
    let (status, body) = ts
        .post(
            token,
            "/api/v1/customers",
            &serde_json::json!({ "name": name, "phone": "9000000001" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "customer create failed: {}", body);
    body["id"].as_str().unwrap().to_string()
}

/// Create a job card and return its id.
pub async fn create_job_card(
    ts: &TestServer,
    token: &str,
    customer_id: &str,
    category: &str,
) -> String {
    let (status, body) = ts
        .post(
            token,
            "/api/v1/job-cards",
            &serde_json::json!({
                "customer_id": customer_id,
                "vehicle_registration": "KA-01-AB-1234",
                "vehicle_model": "CB350",
                "category": category,
                "description": "routine service",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "job card create failed: {}", body);
    body["id"].as_str().unwrap().to_string()
}
