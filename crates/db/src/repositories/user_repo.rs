//! Repository for the `users` table.

use mindtwin_core::progress::ProgressState;
use mindtwin_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::user::{CreateUser, UpdateProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, name, password_hash, avatar_url, initial_mood, preferences, \
                       onboarding_complete, xp, level, streak, created_at, updated_at";

/// Provides CRUD operations for users and their progress counters.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, name, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Update profile fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                avatar_url = COALESCE($3, avatar_url),
                initial_mood = COALESCE($4, initial_mood),
                preferences = COALESCE($5, preferences)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.avatar_url)
            .bind(&input.initial_mood)
            .bind(&input.preferences)
            .fetch_optional(pool)
            .await
    }

    /// Mark onboarding as complete. Returns `None` if the user does not exist.
    pub async fn set_onboarding_complete(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET onboarding_complete = true WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Read a user's progress counters without locking.
    pub async fn find_progress(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProgressState>, sqlx::Error> {
        let row: Option<(i64, i32, i32)> =
            sqlx::query_as("SELECT xp, level, streak FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(xp, level, streak)| ProgressState { xp, level, streak }))
    }

    /// Read a user's progress counters and lock the row until `tx` ends.
    ///
    /// Concurrent progress updates for the same user block here, so each
    /// one sees the result of the previous.
    pub async fn lock_progress(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<ProgressState>, sqlx::Error> {
        let row: Option<(i64, i32, i32)> =
            sqlx::query_as("SELECT xp, level, streak FROM users WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut **tx)
                .await?;
        Ok(row.map(|(xp, level, streak)| ProgressState { xp, level, streak }))
    }

    /// Write new progress counters. Returns `true` if the row was updated.
    pub async fn save_progress(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        progress: &ProgressState,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET xp = $2, level = $3, streak = $4 WHERE id = $1")
            .bind(id)
            .bind(progress.xp)
            .bind(progress.level)
            .bind(progress.streak)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
