use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Inline messages shown in place of a panel's content when its fetch fails.
pub const DATA_ERROR: &str = "Data Error";
pub const POSITIONS_ERROR: &str = "Error loading positions";
pub const HISTORY_ERROR: &str = "Error loading history";
pub const POINTS_ERROR: &str = "Error fetching points";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// An upstream fetch failed. Carries the panel message, never the cause.
    #[error("{0}")]
    Upstream(&'static str),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, (*msg).to_string()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}
