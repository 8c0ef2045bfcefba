use axum::routing::post;
use axum::Router;

use crate::handlers::chatbot;
use crate::state::AppState;

/// Routes mounted at `/chatbot`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(chatbot::chat))
}
