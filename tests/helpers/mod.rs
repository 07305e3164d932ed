//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use mercato_api::{AppState, build_router};
use mercato_core::config::AppConfig;

/// Test application context
pub struct TestApp {
    /// Fully wired application state, exposed so tests can reach the
    /// token encoder and the user store directly.
    pub state: AppState,
}

/// A decoded test response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    /// Create a new test application with an in-memory user store.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test application from a custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }

    /// Build a fresh router over the shared state.
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Perform a single request against the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request build failed"),
            None => builder.body(Body::empty()).expect("request build failed"),
        };

        let response = self
            .router()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body read failed");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body was not JSON")
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Register a user through the API.
    pub async fn register(&self, email: &str, password: &str, role: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": email,
                "password": password,
                "role": role,
            })),
            None,
        )
        .await
    }

    /// Log in and return the (access, refresh) token pair.
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);

        let access = response.body["access_token"].as_str().unwrap().to_string();
        let refresh = response.body["refresh_token"].as_str().unwrap().to_string();
        (access, refresh)
    }
}

/// Configuration used by the integration suite.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.secret = "integration-test-secret".to_string();
    config
}
