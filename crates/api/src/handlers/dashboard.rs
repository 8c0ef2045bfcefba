//! Progress dashboard for the authenticated user.
//!
//! Badges are derived from the stored counters on every read; nothing here
//! writes.

use axum::extract::State;
use axum::Json;
use chrono::{Duration, Utc};
use mindtwin_core::error::CoreError;
use mindtwin_core::progress::{derive_badges, Badge};
use mindtwin_core::types::Timestamp;
use mindtwin_core::wellness::DEFAULT_RECENT_DAYS;
use mindtwin_db::repositories::{CheckInRepo, CompletedLessonRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// One point on the recent-mood chart.
#[derive(Debug, Serialize)]
pub struct MoodPoint {
    pub mood: String,
    pub energy: i32,
    pub recorded_at: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub xp: i64,
    pub level: i32,
    pub streak: i32,
    pub next_level_xp: i64,
    pub badges: Vec<Badge>,
    /// Check-ins from the last week, oldest first.
    pub recent_moods: Vec<MoodPoint>,
    pub total_lessons_completed: i64,
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<DashboardResponse>>> {
    let progress = UserRepo::find_progress(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let since = Utc::now() - Duration::days(DEFAULT_RECENT_DAYS);
    let recent = CheckInRepo::list_since(&state.pool, auth.user_id, since).await?;
    let recent_moods = recent
        .into_iter()
        .rev()
        .map(|c| MoodPoint {
            mood: c.mood,
            energy: c.energy,
            recorded_at: c.created_at,
        })
        .collect();

    let total_lessons_completed =
        CompletedLessonRepo::count_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: DashboardResponse {
            xp: progress.xp,
            level: progress.level,
            streak: progress.streak,
            next_level_xp: progress.next_level_xp(),
            badges: derive_badges(&progress),
            recent_moods,
            total_lessons_completed,
        },
    }))
}
