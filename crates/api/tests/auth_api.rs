//! HTTP-level integration tests for registration, login, token refresh,
//! logout and profile endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get, get_auth, post_json, post_json_auth, put_json_auth, register_user,
    TEST_PASSWORD,
};
use sqlx::PgPool;

async fn login(app: axum::Router, email: &str, password: &str) -> axum::response::Response {
    let body = serde_json::json!({ "email": email, "password": password });
    post_json(app, "/api/v1/auth/login", body).await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// A fresh account starts at xp 0, level 1, streak 0.
#[sqlx::test(migrations = "../../db/migrations")]
async fn register_returns_tokens_and_initial_progress(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "Ada@Example.com",
        "name": "Ada",
        "password": TEST_PASSWORD,
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["email"], "ada@example.com");
    assert_eq!(json["user"]["xp"], 0);
    assert_eq!(json["user"]["level"], 1);
    assert_eq!(json["user"]["streak"], 0);
    assert_eq!(json["user"]["onboarding_complete"], false);
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_duplicate_email_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(app.clone(), "dup@example.com").await;

    let body = serde_json::json!({
        "email": "dup@example.com",
        "name": "Again",
        "password": TEST_PASSWORD,
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_invalid_email_and_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let bad_email = serde_json::json!({
        "email": "not-an-email",
        "name": "Bo",
        "password": TEST_PASSWORD,
    });
    let response = post_json(app.clone(), "/api/v1/auth/register", bad_email).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let short_password = serde_json::json!({
        "email": "bo@example.com",
        "name": "Bo",
        "password": "short",
    });
    let response = post_json(app, "/api/v1/auth/register", short_password).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Login / refresh / logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_success_and_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_user(app.clone(), "lin@example.com").await;

    let response = login(app.clone(), "lin@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["id"], user.id);

    let response = login(app.clone(), "lin@example.com", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid email or password");

    let response = login(app, "nobody@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A refresh token can be used exactly once.
#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(app.clone(), "rot@example.com").await;
    let json = body_json(login(app.clone(), "rot@example.com", TEST_PASSWORD).await).await;
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app.clone(), "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"], refresh_token);

    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Two simultaneous refreshes with the same token: only one is honoured.
#[sqlx::test(migrations = "../../db/migrations")]
async fn racing_refreshes_redeem_token_once(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(app.clone(), "race-refresh@example.com").await;

    for _ in 0..5 {
        let json =
            body_json(login(app.clone(), "race-refresh@example.com", TEST_PASSWORD).await).await;
        let body = serde_json::json!({ "refresh_token": json["refresh_token"] });

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let (app, body) = (app.clone(), body.clone());
                tokio::spawn(async move {
                    post_json(app, "/api/v1/auth/refresh", body).await.status()
                })
            })
            .collect();
        let mut statuses = Vec::new();
        for handle in handles {
            statuses.push(handle.await.unwrap());
        }
        statuses.sort_by_key(|s| s.as_u16());
        assert_eq!(statuses, vec![StatusCode::OK, StatusCode::UNAUTHORIZED]);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(app.clone(), "out@example.com").await;
    let json = body_json(login(app.clone(), "out@example.com", TEST_PASSWORD).await).await;
    let access = json["access_token"].as_str().unwrap();
    let refresh = json["refresh_token"].as_str().unwrap();

    let response =
        post_json_auth(app.clone(), "/api/v1/auth/logout", serde_json::json!({}), access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = serde_json::json!({ "refresh_token": refresh });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Auth enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_routes_require_bearer_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/dashboard").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let response = get_auth(app, "/api/v1/users/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_update_and_onboarding(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_user(app.clone(), "me@example.com").await;

    let body = serde_json::json!({ "name": "  Mira  ", "preferences": "mornings" });
    let response = put_json_auth(app.clone(), "/api/v1/users/me", body, &user.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Mira");
    assert_eq!(json["data"]["preferences"], "mornings");

    let body = serde_json::json!({ "initial_mood": "hopeful" });
    let response =
        post_json_auth(app.clone(), "/api/v1/users/me/onboarding", body, &user.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get_auth(app, "/api/v1/users/me", &user.token).await).await;
    assert_eq!(json["data"]["onboarding_complete"], true);
    assert_eq!(json["data"]["initial_mood"], "hopeful");
    assert_eq!(json["data"]["preferences"], "mornings");
}
