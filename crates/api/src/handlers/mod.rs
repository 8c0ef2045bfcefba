//! Request handlers, one submodule per resource.
//!
//! Handlers validate input, delegate to a repository or the activity service,
//! and map errors via [`AppError`].

use mindtwin_core::error::CoreError;
use validator::Validate;

use crate::error::{AppError, AppResult};

pub mod auth;
pub mod chatbot;
pub mod check_ins;
pub mod dashboard;
pub mod journal;
pub mod lessons;
pub mod users;

/// Run `validator` derive rules on a request body.
pub(crate) fn validate_request<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))
}

/// Lift a domain validation result into an [`AppError`].
pub(crate) fn check(result: Result<(), String>) -> AppResult<()> {
    result.map_err(|msg| AppError::Core(CoreError::Validation(msg)))
}
