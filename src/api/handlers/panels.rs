use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::analytics::aggregator::{MarketRow, Overview};
use crate::analytics::arbitrage::ArbRow;
use crate::api::types::ApiResponse;
use crate::errors::AppError;
use crate::navigation::Panel;
use crate::services::{views, ChatMessage};
use crate::AppState;

/// What a panel shows right after it is entered.
#[derive(Debug, Serialize)]
#[serde(tag = "panel", content = "content", rename_all = "snake_case")]
pub enum PanelPayload {
    Markets(Vec<MarketRow>),
    Overview(Overview),
    Arbitrage(Vec<ArbRow>),
    /// Address panels only prefill their input; the lookup waits for submit.
    Wallet { address: Option<String> },
    Trades { address: Option<String> },
    Points { address: Option<String> },
    Chat(Vec<ChatMessage>),
}

/// GET /api/panels: Panel names in menu order.
pub async fn list() -> Json<ApiResponse<Vec<Panel>>> {
    Json(ApiResponse::ok(Panel::ALL.to_vec()))
}

/// GET /api/panels/:name: Enter a panel and run its load action.
pub async fn enter(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<PanelPayload>>, AppError> {
    let panel: Panel = name.parse().map_err(|e| AppError::NotFound(format!("{e}")))?;
    tracing::debug!(panel = %panel, "Entering panel");

    let payload = match panel {
        Panel::Markets => PanelPayload::Markets(views::market_list(&state, "").await?),
        Panel::Overview => PanelPayload::Overview(views::overview(&state).await?),
        Panel::Arbitrage => PanelPayload::Arbitrage(views::arbitrage(&state).await?),
        Panel::Wallet => PanelPayload::Wallet {
            address: views::saved_wallet(&state).await,
        },
        Panel::Trades => PanelPayload::Trades {
            address: views::saved_wallet(&state).await,
        },
        Panel::Points => PanelPayload::Points {
            address: views::saved_wallet(&state).await,
        },
        Panel::Chat => PanelPayload::Chat(state.chat.transcript().await),
    };

    Ok(Json(ApiResponse::ok(payload)))
}
