pub mod auth;
pub mod chatbot;
pub mod check_ins;
pub mod dashboard;
pub mod health;
pub mod journal;
pub mod lessons;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/refresh                  refresh (public)
/// /auth/logout                   logout (requires auth)
///
/// /users/me                      get, update own profile
/// /users/me/onboarding           complete onboarding (POST)
///
/// /lessons                       list, create
/// /lessons/{id}                  get
/// /lessons/{id}/complete         complete lesson (POST)
///
/// /check-ins                     list recent, create
/// /journal                       list recent, create
/// /dashboard                     progress summary
/// /chatbot                       canned reply (POST)
/// ```
///
/// Every route except the public auth ones requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/lessons", lessons::router())
        .nest("/check-ins", check_ins::router())
        .nest("/journal", journal::router())
        .nest("/dashboard", dashboard::router())
        .nest("/chatbot", chatbot::router())
}
