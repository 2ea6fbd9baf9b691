use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::analytics::account::{PointsView, PositionsView, TradesView};
use crate::api::types::ApiResponse;
use crate::errors::AppError;
use crate::services::views;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AddressParams {
    #[serde(default)]
    pub address: String,
}

/// GET /api/wallet/saved: Last-used wallet, `null` when none.
pub async fn saved(State(state): State<AppState>) -> Json<ApiResponse<Option<String>>> {
    Json(ApiResponse::ok(views::saved_wallet(&state).await))
}

/// GET /api/wallet/positions?address=: Open positions with unrealized PnL.
pub async fn positions(
    State(state): State<AppState>,
    Query(params): Query<AddressParams>,
) -> Result<Json<ApiResponse<PositionsView>>, AppError> {
    let view = views::positions(&state, &params.address).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// GET /api/wallet/trades?address=: Most recent executions.
pub async fn trades(
    State(state): State<AppState>,
    Query(params): Query<AddressParams>,
) -> Result<Json<ApiResponse<TradesView>>, AppError> {
    let view = views::trades(&state, &params.address).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// GET /api/wallet/points?address=: Incentive points by period.
pub async fn points(
    State(state): State<AppState>,
    Query(params): Query<AddressParams>,
) -> Result<Json<ApiResponse<PointsView>>, AppError> {
    let view = views::points(&state, &params.address).await?;
    Ok(Json(ApiResponse::ok(view)))
}
