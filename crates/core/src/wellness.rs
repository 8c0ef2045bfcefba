//! Validation rules and limits for check-ins, journal entries, lessons and
//! listing parameters.
//!
//! Functions return `Err(String)` with a human-readable message; handlers
//! wrap it in [`CoreError::Validation`](crate::error::CoreError::Validation).

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest accepted energy rating.
pub const MIN_ENERGY: i32 = 1;

/// Highest accepted energy rating.
pub const MAX_ENERGY: i32 = 5;

/// Maximum length of a mood label.
pub const MAX_MOOD_LENGTH: usize = 50;

/// Maximum length of a journal entry body.
pub const MAX_JOURNAL_CONTENT_LENGTH: usize = 10_000;

/// Journal entry types.
pub const ENTRY_TYPE_TEXT: &str = "text";
pub const ENTRY_TYPE_VOICE: &str = "voice";
pub const ENTRY_TYPE_PHOTO: &str = "photo";

/// All valid journal entry types.
pub const VALID_ENTRY_TYPES: &[&str] = &[ENTRY_TYPE_TEXT, ENTRY_TYPE_VOICE, ENTRY_TYPE_PHOTO];

/// Default window, in days, for "recent" check-ins and journal entries.
pub const DEFAULT_RECENT_DAYS: i64 = 7;

/// Largest accepted "recent" window.
pub const MAX_RECENT_DAYS: i64 = 365;

/// Default and maximum page size for lesson listings.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Check-ins
// ---------------------------------------------------------------------------

/// Validate that an energy rating is within `MIN_ENERGY..=MAX_ENERGY`.
pub fn validate_energy(energy: i32) -> Result<(), String> {
    if (MIN_ENERGY..=MAX_ENERGY).contains(&energy) {
        Ok(())
    } else {
        Err(format!(
            "Energy must be between {MIN_ENERGY} and {MAX_ENERGY}, got {energy}"
        ))
    }
}

/// Validate a free-form mood label.
pub fn validate_mood(mood: &str) -> Result<(), String> {
    let trimmed = mood.trim();
    if trimmed.is_empty() {
        return Err("Mood cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_MOOD_LENGTH {
        return Err(format!(
            "Mood exceeds maximum length of {MAX_MOOD_LENGTH} characters"
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Journal
// ---------------------------------------------------------------------------

pub fn validate_journal_content(content: &str) -> Result<(), String> {
    if content.trim().is_empty() {
        return Err("Journal content cannot be empty".to_string());
    }
    if content.len() > MAX_JOURNAL_CONTENT_LENGTH {
        return Err(format!(
            "Journal content exceeds maximum length of {MAX_JOURNAL_CONTENT_LENGTH} characters"
        ));
    }
    Ok(())
}

pub fn validate_entry_type(entry_type: &str) -> Result<(), String> {
    if VALID_ENTRY_TYPES.contains(&entry_type) {
        Ok(())
    } else {
        Err(format!(
            "Invalid entry type '{entry_type}'. Must be one of: {}",
            VALID_ENTRY_TYPES.join(", ")
        ))
    }
}

/// Voice entries need a `voice_url`, photo entries a `photo_url`.
pub fn validate_entry_media(
    entry_type: &str,
    voice_url: Option<&str>,
    photo_url: Option<&str>,
) -> Result<(), String> {
    let missing = match entry_type {
        ENTRY_TYPE_VOICE => voice_url.map_or(true, str::is_empty).then_some("voice_url"),
        ENTRY_TYPE_PHOTO => photo_url.map_or(true, str::is_empty).then_some("photo_url"),
        _ => None,
    };
    match missing {
        Some(field) => Err(format!("A {entry_type} entry requires {field}")),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Lessons
// ---------------------------------------------------------------------------

pub fn validate_xp_reward(xp_reward: i32) -> Result<(), String> {
    if xp_reward < 0 {
        return Err(format!("XP reward must not be negative, got {xp_reward}"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Listing parameters
// ---------------------------------------------------------------------------

/// Clamp a user-provided page size to `[1, max]`, defaulting when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Clamp a "recent" window to `[1, MAX_RECENT_DAYS]`.
pub fn clamp_recent_days(days: Option<i64>) -> i64 {
    days.unwrap_or(DEFAULT_RECENT_DAYS).clamp(1, MAX_RECENT_DAYS)
}
