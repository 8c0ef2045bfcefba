//! Route definitions for the `/lessons` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::lessons;
use crate::state::AppState;

/// Routes mounted at `/lessons`.
///
/// ```text
/// GET  /               -> list_lessons
/// POST /               -> create_lesson
/// GET  /{id}           -> get_lesson
/// POST /{id}/complete  -> complete_lesson
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lessons::list_lessons).post(lessons::create_lesson))
        .route("/{id}", get(lessons::get_lesson))
        .route("/{id}/complete", post(lessons::complete_lesson))
}
