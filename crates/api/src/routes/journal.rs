use axum::routing::get;
use axum::Router;

use crate::handlers::journal;
use crate::state::AppState;

/// Routes mounted at `/journal`.
///
/// ```text
/// GET  /  -> list_entries (?days=)
/// POST /  -> create_entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(journal::list_entries).post(journal::create_entry))
}
