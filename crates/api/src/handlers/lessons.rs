//! Handlers for the `/lessons` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use mindtwin_core::error::CoreError;
use mindtwin_core::progress::DEFAULT_LESSON_XP_REWARD;
use mindtwin_core::types::{DbId, Timestamp};
use mindtwin_core::wellness::{
    clamp_limit, clamp_offset, validate_xp_reward, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use mindtwin_db::models::lesson::{CreateLesson, Lesson, LessonWithCompletion};
use mindtwin_db::repositories::LessonRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::activity;
use crate::error::{AppError, AppResult};
use crate::handlers::{check, validate_request};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /lessons`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLessonRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    pub xp_reward: Option<i32>,
}

/// Response for a successful lesson completion.
#[derive(Debug, Serialize)]
pub struct LessonCompletedResponse {
    pub user_id: DbId,
    pub lesson_id: DbId,
    pub completed_at: Timestamp,
    pub xp: i64,
    pub level: i32,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/lessons?limit=&offset=
///
/// Each lesson carries a `completed` flag for the requesting user.
pub async fn list_lessons(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<LessonWithCompletion>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let offset = clamp_offset(params.offset);

    let lessons = LessonRepo::list_for_user(&state.pool, auth.user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: lessons }))
}

/// POST /api/v1/lessons
///
/// `xp_reward` defaults to 50 when omitted.
pub async fn create_lesson(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateLessonRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Lesson>>)> {
    validate_request(&input)?;
    let xp_reward = input.xp_reward.unwrap_or(DEFAULT_LESSON_XP_REWARD);
    check(validate_xp_reward(xp_reward))?;

    let lesson = LessonRepo::create(
        &state.pool,
        &CreateLesson {
            title: input.title.trim().to_string(),
            description: input.description,
            content: input.content,
            xp_reward,
        },
    )
    .await?;

    tracing::info!(
        lesson_id = lesson.id,
        xp_reward,
        created_by = auth.user_id,
        "Lesson created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: lesson })))
}

/// GET /api/v1/lessons/{id}
pub async fn get_lesson(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LessonWithCompletion>>> {
    let lesson = LessonRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lesson",
            id,
        }))?;
    Ok(Json(DataResponse { data: lesson }))
}

/// POST /api/v1/lessons/{id}/complete
///
/// Award the lesson's XP once. A repeat completion is rejected with 409 and
/// changes nothing.
pub async fn complete_lesson(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LessonCompletedResponse>>> {
    let outcome = activity::complete_lesson(&state.pool, &state.engine(), auth.user_id, id).await?;

    Ok(Json(DataResponse {
        data: LessonCompletedResponse {
            user_id: outcome.completion.user_id,
            lesson_id: outcome.completion.lesson_id,
            completed_at: outcome.completion.completed_at,
            xp: outcome.progress.xp,
            level: outcome.progress.level,
        },
    }))
}
