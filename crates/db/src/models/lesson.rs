//! Lesson entity model and DTOs.

use mindtwin_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `lessons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lesson {
    pub id: DbId,
    pub title: String,
    pub description: String,
    /// Story-arc content, stored as an opaque string.
    pub content: String,
    pub xp_reward: i32,
    pub created_at: Timestamp,
}

/// A lesson plus whether the requesting user has completed it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LessonWithCompletion {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub content: String,
    pub xp_reward: i32,
    pub created_at: Timestamp,
    pub completed: bool,
}

/// DTO for creating a new lesson.
#[derive(Debug, Deserialize)]
pub struct CreateLesson {
    pub title: String,
    pub description: String,
    pub content: String,
    pub xp_reward: i32,
}
