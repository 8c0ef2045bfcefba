//! Repository for the `check_ins` table.

use mindtwin_core::types::{DbId, Timestamp};
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::check_in::{CheckIn, CreateCheckIn};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, mood, energy, created_at";

/// Provides access to daily check-ins.
pub struct CheckInRepo;

impl CheckInRepo {
    /// Insert a check-in inside a progress transaction.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateCheckIn,
    ) -> Result<CheckIn, sqlx::Error> {
        let query = format!(
            "INSERT INTO check_ins (user_id, mood, energy, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CheckIn>(&query)
            .bind(input.user_id)
            .bind(&input.mood)
            .bind(input.energy)
            .bind(input.created_at)
            .fetch_one(&mut **tx)
            .await
    }

    /// Timestamp of the user's most recent check-in, if any.
    pub async fn latest_at(
        tx: &mut Transaction<'_, Postgres>,
        user_id: DbId,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        let (latest,): (Option<Timestamp>,) =
            sqlx::query_as("SELECT MAX(created_at) FROM check_ins WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&mut **tx)
                .await?;
        Ok(latest)
    }

    /// Check-ins created at or after `since`, newest first.
    pub async fn list_since(
        pool: &PgPool,
        user_id: DbId,
        since: Timestamp,
    ) -> Result<Vec<CheckIn>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM check_ins
             WHERE user_id = $1 AND created_at >= $2
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CheckIn>(&query)
            .bind(user_id)
            .bind(since)
            .fetch_all(pool)
            .await
    }
}
