//! Lesson completion record.

use mindtwin_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `completed_lessons` table. At most one per (user, lesson).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CompletedLesson {
    pub id: DbId,
    pub user_id: DbId,
    pub lesson_id: DbId,
    pub completed_at: Timestamp,
}
