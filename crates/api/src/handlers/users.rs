//! Handlers for the authenticated user's own profile (`/users/me`).

use axum::extract::State;
use axum::Json;
use mindtwin_core::error::CoreError;
use mindtwin_core::types::DbId;
use mindtwin_core::wellness::validate_mood;
use mindtwin_db::models::user::{UpdateProfile, User, UserResponse};
use mindtwin_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::{check, validate_request};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /users/me`. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMeRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(url(message = "Invalid avatar URL"))]
    pub avatar_url: Option<String>,
    pub initial_mood: Option<String>,
    pub preferences: Option<String>,
}

/// Request body for `POST /users/me/onboarding`.
#[derive(Debug, Default, Deserialize)]
pub struct OnboardingRequest {
    pub initial_mood: Option<String>,
    pub preferences: Option<String>,
}

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

fn respond(user: User) -> Json<DataResponse<UserResponse>> {
    Json(DataResponse { data: user.into() })
}

/// GET /api/v1/users/me
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| user_not_found(auth.user_id))?;
    Ok(respond(user))
}

/// PUT /api/v1/users/me
///
/// Progress counters are not writable here; they only move through activity
/// events.
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateMeRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    validate_request(&input)?;
    if let Some(mood) = input.initial_mood.as_deref() {
        check(validate_mood(mood))?;
    }

    let update = UpdateProfile {
        name: input.name.map(|n| n.trim().to_string()),
        avatar_url: input.avatar_url,
        initial_mood: input.initial_mood,
        preferences: input.preferences,
    };
    let user = UserRepo::update_profile(&state.pool, auth.user_id, &update)
        .await?
        .ok_or_else(|| user_not_found(auth.user_id))?;

    Ok(respond(user))
}

/// POST /api/v1/users/me/onboarding
///
/// Store the onboarding answers (if any) and mark onboarding complete.
/// Calling it again is harmless.
pub async fn complete_onboarding(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<OnboardingRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if let Some(mood) = input.initial_mood.as_deref() {
        check(validate_mood(mood))?;
    }

    if input.initial_mood.is_some() || input.preferences.is_some() {
        let update = UpdateProfile {
            initial_mood: input.initial_mood,
            preferences: input.preferences,
            ..Default::default()
        };
        UserRepo::update_profile(&state.pool, auth.user_id, &update).await?;
    }

    let user = UserRepo::set_onboarding_complete(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| user_not_found(auth.user_id))?;

    tracing::info!(user_id = user.id, "Onboarding completed");
    Ok(respond(user))
}
