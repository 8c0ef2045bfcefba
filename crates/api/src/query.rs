//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped with `wellness::clamp_limit` / `wellness::clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Window for "recent" listings (`?days=`), clamped with
/// `wellness::clamp_recent_days`.
#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub days: Option<i64>,
}
