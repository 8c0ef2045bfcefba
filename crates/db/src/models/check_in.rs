//! Daily check-in model and DTOs.

use mindtwin_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `check_ins` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CheckIn {
    pub id: DbId,
    pub user_id: DbId,
    pub mood: String,
    pub energy: i32,
    pub created_at: Timestamp,
}

/// DTO for inserting a check-in.
#[derive(Debug)]
pub struct CreateCheckIn {
    pub user_id: DbId,
    pub mood: String,
    pub energy: i32,
    pub created_at: Timestamp,
}
