use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::analytics::aggregator::{MarketRow, Overview};
use crate::api::types::ApiResponse;
use crate::errors::AppError;
use crate::services::views;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: String,
}

/// GET /api/markets?search=: Live market list, highest volume first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<MarketRow>>>, AppError> {
    let rows = views::market_list(&state, &params.search).await?;
    Ok(Json(ApiResponse::ok(rows)))
}

/// GET /api/overview: Totals, highlights, gainers and losers.
pub async fn overview(State(state): State<AppState>) -> Result<Json<ApiResponse<Overview>>, AppError> {
    let overview = views::overview(&state).await?;
    Ok(Json(ApiResponse::ok(overview)))
}
