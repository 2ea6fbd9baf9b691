use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::types::ApiResponse;
use crate::errors::AppError;
use crate::services::{ChatError, ChatMessage};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

/// GET /api/chat: Transcript so far.
pub async fn transcript(State(state): State<AppState>) -> Json<ApiResponse<Vec<ChatMessage>>> {
    Json(ApiResponse::ok(state.chat.transcript().await))
}

/// POST /api/chat: Ask one question. Blank input returns `data: null` and
/// sends nothing; a second question while one is pending is a 409.
pub async fn ask(
    State(state): State<AppState>,
    Json(body): Json<AskRequest>,
) -> Result<Json<ApiResponse<ChatMessage>>, AppError> {
    match state.chat.ask(&body.question).await {
        Ok(Some(reply)) => Ok(Json(ApiResponse::ok(reply))),
        Ok(None) => Ok(Json(ApiResponse::empty())),
        Err(ChatError::Busy) => Err(AppError::Conflict("A question is already pending".into())),
    }
}
