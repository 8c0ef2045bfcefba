//! Repository for the `completed_lessons` table.

use mindtwin_core::progress::CompletionRecord;
use mindtwin_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::completed_lesson::CompletedLesson;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, lesson_id, completed_at";

/// Provides access to lesson completion records.
pub struct CompletedLessonRepo;

impl CompletedLessonRepo {
    /// Whether `user_id` has already completed `lesson_id`.
    pub async fn exists(
        tx: &mut Transaction<'_, Postgres>,
        user_id: DbId,
        lesson_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM completed_lessons WHERE user_id = $1 AND lesson_id = $2
             )",
        )
        .bind(user_id)
        .bind(lesson_id)
        .fetch_one(&mut **tx)
        .await?;
        Ok(exists)
    }

    /// Persist a completion record produced by the progress engine.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        record: &CompletionRecord,
    ) -> Result<CompletedLesson, sqlx::Error> {
        let query = format!(
            "INSERT INTO completed_lessons (user_id, lesson_id, completed_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CompletedLesson>(&query)
            .bind(record.user_id)
            .bind(record.lesson_id)
            .bind(record.completed_at)
            .fetch_one(&mut **tx)
            .await
    }

    /// Number of lessons a user has completed.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM completed_lessons WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
