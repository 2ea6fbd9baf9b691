//! Panel loaders: fetch what a panel needs from upstream and shape it for
//! display. Every failure is logged here and surfaces as the panel's one
//! generic message.

use anyhow::Context;
use chrono::Utc;
use metrics::counter;

use crate::analytics::account::{self, PositionsView, PointsView, TradesView, ENTER_ADDRESS};
use crate::analytics::aggregator::{self, MarketRow, Overview};
use crate::analytics::arbitrage::{self, ArbRow};
use crate::analytics::chart::{self, Sparkline};
use crate::errors::{AppError, DATA_ERROR, HISTORY_ERROR, POINTS_ERROR, POSITIONS_ERROR};
use crate::hyperliquid::MetaAndAssetCtxs;
use crate::models::MarketSummary;
use crate::reya::ReyaClientError;
use crate::AppState;

/// Live market list, filtered by `search`.
pub async fn market_list(state: &AppState, search: &str) -> Result<Vec<MarketRow>, AppError> {
    let markets = state.reya.get_market_summaries().await.map_err(|e| {
        tracing::error!(error = %e, "Market summary fetch failed");
        AppError::Upstream(DATA_ERROR)
    })?;
    Ok(aggregator::market_list(&markets, search))
}

pub async fn overview(state: &AppState) -> Result<Overview, AppError> {
    let markets = state.reya.get_market_summaries().await.map_err(|e| {
        tracing::error!(error = %e, "Market summary fetch failed");
        AppError::Upstream(DATA_ERROR)
    })?;
    Ok(aggregator::overview(&markets))
}

/// Reya summaries and Hyperliquid contexts, fetched together. Either failing
/// fails both, with the failing side named in the error.
pub async fn funding_inputs(
    state: &AppState,
) -> anyhow::Result<(Vec<MarketSummary>, MetaAndAssetCtxs)> {
    tokio::try_join!(
        async {
            state
                .reya
                .get_market_summaries()
                .await
                .context("Reya market summaries")
        },
        async {
            state
                .hyperliquid
                .get_meta_and_asset_ctxs()
                .await
                .context("Hyperliquid asset contexts")
        },
    )
}

pub async fn arbitrage(state: &AppState) -> Result<Vec<ArbRow>, AppError> {
    let (reya, hyperliquid) = funding_inputs(state).await.map_err(|e| {
        tracing::error!(error = %format!("{e:#}"), "Arbitrage scan failed");
        AppError::Upstream(DATA_ERROR)
    })?;

    let funding = arbitrage::funding_map(&hyperliquid);
    let rows = arbitrage::scan(&reya, &funding);
    tracing::debug!(
        reya_markets = reya.len(),
        hyperliquid_assets = funding.len(),
        matched = rows.len(),
        "Arbitrage scan complete"
    );
    Ok(rows)
}

/// Persist the address as the last-used wallet. The lookup proceeds whether
/// or not this succeeds.
async fn remember_wallet(state: &AppState, view: &'static str, address: &str) {
    counter!("wallet_lookups_total", "view" => view).increment(1);
    if let Err(e) = state.wallet_store.save(address).await {
        tracing::warn!(
            error = %e,
            path = %state.wallet_store.path().display(),
            "Failed to persist saved wallet"
        );
    }
}

pub async fn positions(state: &AppState, address: &str) -> Result<PositionsView, AppError> {
    let address = address.trim();
    remember_wallet(state, "positions", address).await;

    if address.is_empty() {
        return Ok(PositionsView::notice(ENTER_ADDRESS));
    }

    let (positions, markets) = tokio::try_join!(
        state.reya.get_positions(address),
        state.reya.get_market_summaries(),
    )
    .map_err(|e| {
        tracing::error!(error = %e, wallet = %address, "Positions lookup failed");
        AppError::Upstream(POSITIONS_ERROR)
    })?;

    Ok(account::positions_view(&positions, &markets))
}

pub async fn trades(state: &AppState, address: &str) -> Result<TradesView, AppError> {
    let address = address.trim();
    remember_wallet(state, "trades", address).await;

    match state.reya.get_perp_executions(address).await {
        Ok(trades) => Ok(account::trades_view(&trades)),
        Err(ReyaClientError::Timeout) => {
            tracing::warn!(wallet = %address, "Trade history lookup timed out upstream");
            Err(AppError::Upstream(HISTORY_ERROR))
        }
        Err(e) => {
            tracing::error!(error = %e, wallet = %address, "Trade history lookup failed");
            Err(AppError::Upstream(HISTORY_ERROR))
        }
    }
}

pub async fn points(state: &AppState, address: &str) -> Result<PointsView, AppError> {
    let address = address.trim();
    remember_wallet(state, "points", address).await;

    let incentives = state.reya.get_incentives(address).await.map_err(|e| {
        tracing::error!(error = %e, wallet = %address, "Points lookup failed");
        AppError::Upstream(POINTS_ERROR)
    })?;
    Ok(account::points_view(incentives.points.as_ref()))
}

/// Address prefill for the wallet, trades and points panels.
pub async fn saved_wallet(state: &AppState) -> Option<String> {
    match state.wallet_store.load().await {
        Ok(saved) => saved,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read saved wallet");
            None
        }
    }
}

/// Sparkline for `symbol`. Missing data and fetch failures both draw nothing.
pub async fn chart(state: &AppState, symbol: &str) -> Option<Sparkline> {
    let end_time_ms = Utc::now().timestamp_millis();
    match state.reya.get_hourly_closes(symbol, end_time_ms).await {
        Ok(closes) => chart::sparkline(symbol, &closes),
        Err(e) => {
            tracing::warn!(error = %e, symbol = %symbol, "Candle history fetch failed");
            None
        }
    }
}
