//! Repository for the `journal_entries` table.

use mindtwin_core::types::{DbId, Timestamp};
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::journal_entry::{CreateJournalEntry, JournalEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, content, mood, entry_type, voice_url, photo_url, created_at";

/// Provides access to journal entries.
pub struct JournalEntryRepo;

impl JournalEntryRepo {
    /// Insert a journal entry inside a progress transaction.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateJournalEntry,
    ) -> Result<JournalEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO journal_entries (user_id, content, mood, entry_type, voice_url, photo_url)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JournalEntry>(&query)
            .bind(input.user_id)
            .bind(&input.content)
            .bind(&input.mood)
            .bind(&input.entry_type)
            .bind(&input.voice_url)
            .bind(&input.photo_url)
            .fetch_one(&mut **tx)
            .await
    }

    /// Journal entries created at or after `since`, newest first.
    pub async fn list_since(
        pool: &PgPool,
        user_id: DbId,
        since: Timestamp,
    ) -> Result<Vec<JournalEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM journal_entries
             WHERE user_id = $1 AND created_at >= $2
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, JournalEntry>(&query)
            .bind(user_id)
            .bind(since)
            .fetch_all(pool)
            .await
    }
}
