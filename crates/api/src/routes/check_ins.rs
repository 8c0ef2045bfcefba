use axum::routing::get;
use axum::Router;

use crate::handlers::check_ins;
use crate::state::AppState;

/// Routes mounted at `/check-ins`.
///
/// ```text
/// GET  /  -> list_check_ins (?days=)
/// POST /  -> create_check_in
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(check_ins::list_check_ins).post(check_ins::create_check_in),
    )
}
