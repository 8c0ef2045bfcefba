//! Transactional wrappers around progress engine transitions.
//!
//! Each function is one atomic unit: open a transaction, lock the user's row
//! with `SELECT ... FOR UPDATE`, apply the engine, write the event record and
//! the new counters, commit. Concurrent events for the same user queue on the
//! row lock; events for different users do not contend. Any error drops the
//! transaction, which rolls back everything written so far.

use chrono::Utc;
use mindtwin_core::error::CoreError;
use mindtwin_core::progress::{self, ProgressEngine, ProgressState};
use mindtwin_core::types::DbId;
use mindtwin_db::models::check_in::{CheckIn, CreateCheckIn};
use mindtwin_db::models::completed_lesson::CompletedLesson;
use mindtwin_db::models::journal_entry::{CreateJournalEntry, JournalEntry};
use mindtwin_db::repositories::{
    CheckInRepo, CompletedLessonRepo, JournalEntryRepo, LessonRepo, UserRepo,
};
use mindtwin_db::DbPool;
use sqlx::{Postgres, Transaction};

use crate::error::{AppError, AppResult};

/// A persisted check-in and the counters after it.
#[derive(Debug)]
pub struct CheckInOutcome {
    pub check_in: CheckIn,
    pub progress: ProgressState,
}

/// A persisted journal entry and the counters after it.
#[derive(Debug)]
pub struct JournalOutcome {
    pub entry: JournalEntry,
    pub progress: ProgressState,
}

/// A persisted completion record and the counters after it.
#[derive(Debug)]
pub struct CompletionOutcome {
    pub completion: CompletedLesson,
    pub progress: ProgressState,
}

/// Input for [`record_journal_entry`], already validated by the caller.
#[derive(Debug)]
pub struct NewJournalEntry {
    pub content: String,
    pub mood: Option<String>,
    pub entry_type: String,
    pub voice_url: Option<String>,
    pub photo_url: Option<String>,
}

/// Record a daily check-in: +10 XP and a streak update.
pub async fn record_check_in(
    pool: &DbPool,
    engine: &ProgressEngine,
    user_id: DbId,
    mood: String,
    energy: i32,
) -> AppResult<CheckInOutcome> {
    let mut tx = pool.begin().await?;
    let current = lock_user(&mut tx, user_id).await?;
    let previous_check_in_at = CheckInRepo::latest_at(&mut tx, user_id).await?;

    let event = progress::CheckIn {
        mood,
        energy,
        checked_in_at: Utc::now(),
        previous_check_in_at,
    };
    let next = engine.apply_check_in(current, &event);

    let check_in = CheckInRepo::create(
        &mut tx,
        &CreateCheckIn {
            user_id,
            mood: event.mood,
            energy: event.energy,
            created_at: event.checked_in_at,
        },
    )
    .await?;
    UserRepo::save_progress(&mut tx, user_id, &next).await?;
    tx.commit().await?;

    tracing::info!(
        user_id,
        xp = next.xp,
        streak = next.streak,
        streak_policy = engine.rules().streak.as_str(),
        "Check-in recorded"
    );

    Ok(CheckInOutcome {
        check_in,
        progress: next,
    })
}

/// Record a journal entry: +15 XP.
pub async fn record_journal_entry(
    pool: &DbPool,
    engine: &ProgressEngine,
    user_id: DbId,
    input: NewJournalEntry,
) -> AppResult<JournalOutcome> {
    let mut tx = pool.begin().await?;
    let current = lock_user(&mut tx, user_id).await?;

    let event = progress::JournalEntry {
        content: input.content,
        mood: input.mood,
        entry_type: input.entry_type,
        voice_url: input.voice_url,
        photo_url: input.photo_url,
    };
    let next = engine.apply_journal_entry(current, &event);

    let entry = JournalEntryRepo::create(
        &mut tx,
        &CreateJournalEntry {
            user_id,
            content: event.content,
            mood: event.mood,
            entry_type: event.entry_type,
            voice_url: event.voice_url,
            photo_url: event.photo_url,
        },
    )
    .await?;
    UserRepo::save_progress(&mut tx, user_id, &next).await?;
    tx.commit().await?;

    tracing::info!(user_id, xp = next.xp, entry_id = entry.id, "Journal entry recorded");

    Ok(JournalOutcome {
        entry,
        progress: next,
    })
}

/// Complete a lesson: award its XP and advance the level.
///
/// Fails with 404 for an unknown lesson and 409 if the user already
/// completed it. Nothing is written in either case.
pub async fn complete_lesson(
    pool: &DbPool,
    engine: &ProgressEngine,
    user_id: DbId,
    lesson_id: DbId,
) -> AppResult<CompletionOutcome> {
    let mut tx = pool.begin().await?;
    let current = lock_user(&mut tx, user_id).await?;

    let xp_reward = LessonRepo::find_xp_reward(&mut tx, lesson_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lesson",
            id: lesson_id,
        }))?;
    let already_completed = CompletedLessonRepo::exists(&mut tx, user_id, lesson_id).await?;

    let event = progress::LessonCompletion {
        user_id,
        lesson_id,
        xp_reward,
        completed_at: Utc::now(),
    };
    let (next, record) = engine.apply_lesson_completion(current, &event, already_completed)?;

    let completion = CompletedLessonRepo::create(&mut tx, &record).await?;
    UserRepo::save_progress(&mut tx, user_id, &next).await?;
    tx.commit().await?;

    if next.level != current.level {
        tracing::info!(
            user_id,
            from = current.level,
            to = next.level,
            "Level up"
        );
    }
    tracing::info!(user_id, lesson_id, xp = next.xp, level = next.level, "Lesson completed");

    Ok(CompletionOutcome {
        completion,
        progress: next,
    })
}

/// Lock the user's row and read their counters, or 404.
async fn lock_user(tx: &mut Transaction<'_, Postgres>, user_id: DbId) -> AppResult<ProgressState> {
    UserRepo::lock_progress(tx, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))
}
