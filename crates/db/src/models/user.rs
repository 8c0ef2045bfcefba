//! User entity model and DTOs.

use mindtwin_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub avatar_url: Option<String>,
    pub initial_mood: Option<String>,
    pub preferences: Option<String>,
    pub onboarding_complete: bool,
    pub xp: i64,
    pub level: i32,
    pub streak: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub initial_mood: Option<String>,
    pub preferences: Option<String>,
    pub onboarding_complete: bool,
    pub xp: i64,
    pub level: i32,
    pub streak: i32,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            avatar_url: user.avatar_url,
            initial_mood: user.initial_mood,
            preferences: user.preferences,
            onboarding_complete: user.onboarding_complete,
            xp: user.xp,
            level: user.level,
            streak: user.streak,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. Progress starts at the column defaults.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// DTO for a profile update. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub initial_mood: Option<String>,
    pub preferences: Option<String>,
}
