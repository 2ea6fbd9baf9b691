use axum::extract::{Path, State};
use axum::Json;

use crate::analytics::chart::Sparkline;
use crate::api::types::ApiResponse;
use crate::services::views;
use crate::AppState;

/// GET /api/chart/:symbol: Hourly sparkline; `data` is null when there is
/// nothing to draw.
pub async fn sparkline(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Json<ApiResponse<Sparkline>> {
    match views::chart(&state, &symbol).await {
        Some(line) => Json(ApiResponse::ok(line)),
        None => Json(ApiResponse::empty()),
    }
}
