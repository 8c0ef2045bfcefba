//! Handlers for journal entries (`/journal`).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use mindtwin_core::wellness::{
    clamp_recent_days, validate_entry_media, validate_entry_type, validate_journal_content,
    validate_mood, ENTRY_TYPE_TEXT,
};
use mindtwin_db::models::journal_entry::JournalEntry;
use mindtwin_db::repositories::JournalEntryRepo;
use serde::{Deserialize, Serialize};

use crate::activity::{self, NewJournalEntry};
use crate::error::AppResult;
use crate::handlers::check;
use crate::middleware::auth::AuthUser;
use crate::query::RecentParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /journal`.
#[derive(Debug, Deserialize)]
pub struct CreateJournalEntryRequest {
    pub content: String,
    pub mood: Option<String>,
    /// `text` (default), `voice` or `photo`.
    pub entry_type: Option<String>,
    pub voice_url: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JournalEntryResponse {
    pub entry: JournalEntry,
    pub xp: i64,
}

/// POST /api/v1/journal
///
/// Awards 15 XP. Level and streak are unchanged.
pub async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateJournalEntryRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<JournalEntryResponse>>)> {
    let entry_type = input
        .entry_type
        .unwrap_or_else(|| ENTRY_TYPE_TEXT.to_string());

    check(validate_journal_content(&input.content))?;
    check(validate_entry_type(&entry_type))?;
    check(validate_entry_media(
        &entry_type,
        input.voice_url.as_deref(),
        input.photo_url.as_deref(),
    ))?;
    if let Some(mood) = input.mood.as_deref() {
        check(validate_mood(mood))?;
    }

    let outcome = activity::record_journal_entry(
        &state.pool,
        &state.engine(),
        auth.user_id,
        NewJournalEntry {
            content: input.content,
            mood: input.mood.map(|m| m.trim().to_string()),
            entry_type,
            voice_url: input.voice_url,
            photo_url: input.photo_url,
        },
    )
    .await?;

    let data = JournalEntryResponse {
        entry: outcome.entry,
        xp: outcome.progress.xp,
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// GET /api/v1/journal?days=
pub async fn list_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<RecentParams>,
) -> AppResult<Json<DataResponse<Vec<JournalEntry>>>> {
    let since = Utc::now() - Duration::days(clamp_recent_days(params.days));
    let entries = JournalEntryRepo::list_since(&state.pool, auth.user_id, since).await?;
    Ok(Json(DataResponse { data: entries }))
}
