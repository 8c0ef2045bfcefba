#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use mindtwin_api::router::build_app_router;
use mindtwin_api::auth::jwt::JwtConfig;
use mindtwin_api::config::ServerConfig;
use mindtwin_api::state::AppState;
use mindtwin_core::progress::ProgressRules;

/// Password used by [`register_user`].
pub const TEST_PASSWORD: &str = "calm-waters-42";

/// Build a test `ServerConfig` with safe defaults and the default progress
/// rules.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        progress: ProgressRules::default(),
    }
}

/// Build the full application router (same middleware stack as `main.rs`).
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    build_app_router(AppState {
        pool,
        config: Arc::new(config),
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A registered user and their access token.
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

/// Register a user through the API and return its id and access token.
pub async fn register_user(app: Router, email: &str) -> TestUser {
    let body = serde_json::json!({
        "email": email,
        "name": "Test User",
        "password": TEST_PASSWORD,
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    TestUser {
        id: json["user"]["id"].as_i64().unwrap(),
        token: json["access_token"].as_str().unwrap().to_string(),
    }
}

/// Create a lesson through the API and return its id.
pub async fn create_lesson(app: Router, token: &str, xp_reward: i32) -> i64 {
    let body = serde_json::json!({
        "title": format!("Breathing basics ({xp_reward} XP)"),
        "description": "Box breathing in four steps",
        "content": "Inhale 4, hold 4, exhale 4, hold 4.",
        "xp_reward": xp_reward,
    });
    let response = post_json_auth(app, "/api/v1/lessons", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
