//! Journal entry model and DTOs.

use mindtwin_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `journal_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JournalEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub mood: Option<String>,
    /// One of `text`, `voice`, `photo`.
    pub entry_type: String,
    pub voice_url: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a journal entry.
#[derive(Debug)]
pub struct CreateJournalEntry {
    pub user_id: DbId,
    pub content: String,
    pub mood: Option<String>,
    pub entry_type: String,
    pub voice_url: Option<String>,
    pub photo_url: Option<String>,
}
