//! Handlers for daily check-ins (`/check-ins`).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use mindtwin_core::wellness::{clamp_recent_days, validate_energy, validate_mood};
use mindtwin_db::models::check_in::CheckIn;
use mindtwin_db::repositories::CheckInRepo;
use serde::{Deserialize, Serialize};

use crate::activity;
use crate::error::AppResult;
use crate::handlers::check;
use crate::middleware::auth::AuthUser;
use crate::query::RecentParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /check-ins`.
#[derive(Debug, Deserialize)]
pub struct CreateCheckInRequest {
    pub mood: String,
    pub energy: i32,
}

/// A recorded check-in together with the user's updated counters.
#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub check_in: CheckIn,
    pub xp: i64,
    pub level: i32,
    pub streak: i32,
}

/// POST /api/v1/check-ins
///
/// Awards 10 XP and advances the streak. Never changes the level.
pub async fn create_check_in(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateCheckInRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CheckInResponse>>)> {
    check(validate_mood(&input.mood))?;
    check(validate_energy(input.energy))?;

    let outcome = activity::record_check_in(
        &state.pool,
        &state.engine(),
        auth.user_id,
        input.mood.trim().to_string(),
        input.energy,
    )
    .await?;

    let data = CheckInResponse {
        check_in: outcome.check_in,
        xp: outcome.progress.xp,
        level: outcome.progress.level,
        streak: outcome.progress.streak,
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// GET /api/v1/check-ins?days=
///
/// Check-ins from the last `days` days (default 7), newest first.
pub async fn list_check_ins(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<RecentParams>,
) -> AppResult<Json<DataResponse<Vec<CheckIn>>>> {
    let since = Utc::now() - Duration::days(clamp_recent_days(params.days));
    let check_ins = CheckInRepo::list_since(&state.pool, auth.user_id, since).await?;
    Ok(Json(DataResponse { data: check_ins }))
}
