//! Repository for the `lessons` table.

use mindtwin_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::lesson::{CreateLesson, Lesson, LessonWithCompletion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, content, xp_reward, created_at";

/// Column list with the per-user `completed` flag; expects the user id as `$1`.
const COLUMNS_WITH_COMPLETION: &str = "l.id, l.title, l.description, l.content, l.xp_reward, \
     l.created_at, EXISTS ( \
         SELECT 1 FROM completed_lessons c WHERE c.lesson_id = l.id AND c.user_id = $1 \
     ) AS completed";

/// Provides CRUD operations for lessons.
pub struct LessonRepo;

impl LessonRepo {
    /// Insert a new lesson, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLesson) -> Result<Lesson, sqlx::Error> {
        let query = format!(
            "INSERT INTO lessons (title, description, content, xp_reward)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(input.xp_reward)
            .fetch_one(pool)
            .await
    }

    /// Find a lesson with the `completed` flag for `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<LessonWithCompletion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS_WITH_COMPLETION} FROM lessons l WHERE l.id = $2");
        sqlx::query_as::<_, LessonWithCompletion>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List lessons in creation order with the `completed` flag for `user_id`.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LessonWithCompletion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS_WITH_COMPLETION} FROM lessons l
             ORDER BY l.id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, LessonWithCompletion>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Look up the XP reward of a lesson inside a progress transaction.
    pub async fn find_xp_reward(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<i32>, sqlx::Error> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT xp_reward FROM lessons WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(row.map(|(xp_reward,)| xp_reward))
    }
}
