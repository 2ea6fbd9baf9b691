use axum::extract::State;
use axum::Json;

use crate::analytics::arbitrage::ArbRow;
use crate::api::types::ApiResponse;
use crate::errors::AppError;
use crate::services::views;
use crate::AppState;

/// GET /api/arbitrage: Reya vs Hyperliquid annualized funding.
pub async fn scan(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<ArbRow>>>, AppError> {
    let rows = views::arbitrage(&state).await?;
    Ok(Json(ApiResponse::ok(rows)))
}
