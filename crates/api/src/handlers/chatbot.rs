//! Handler for the encouragement chatbot.

use axum::Json;
use mindtwin_core::chatbot::pick_reply;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::validate_request;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: &'static str,
}

/// POST /api/v1/chatbot
///
/// Returns one of a fixed set of encouraging replies. The message is not
/// inspected beyond length checks.
pub async fn chat(
    auth: AuthUser,
    Json(input): Json<ChatRequest>,
) -> AppResult<Json<DataResponse<ChatResponse>>> {
    validate_request(&input)?;
    tracing::debug!(user_id = auth.user_id, "Chatbot message received");

    Ok(Json(DataResponse {
        data: ChatResponse {
            reply: pick_reply(),
        },
    }))
}
