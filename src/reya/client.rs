use std::time::Instant;

use reqwest::{Client, StatusCode, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{CandleHistory, ExecutionsPage, IncentivesResponse};
use crate::config::AppConfig;
use crate::metrics::record_upstream;
use crate::models::{MarketSummary, Position, Trade};

/// Executions fetched per trade-history lookup.
pub const EXECUTIONS_LIMIT: u32 = 50;

#[derive(Debug, Error)]
pub enum ReyaClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered 504; the wallet indexer is overloaded.
    #[error("upstream gateway timeout")]
    Timeout,

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

#[derive(Debug, Clone)]
pub struct ReyaClient {
    http: Client,
    markets_url: String,
    wallet_base: String,
    incentives_base: String,
    history_base: String,
}

impl ReyaClient {
    pub fn new(http: Client, config: &AppConfig) -> Self {
        Self {
            http,
            markets_url: config.reya_markets_url.clone(),
            wallet_base: config.reya_wallet_base.clone(),
            incentives_base: config.reya_incentives_base.clone(),
            history_base: config.reya_history_base.clone(),
        }
    }

    /// Snapshot of every market summary.
    pub async fn get_market_summaries(&self) -> Result<Vec<MarketSummary>, ReyaClientError> {
        let url = parse_url(&self.markets_url)?;
        self.get_json("reya_markets", url).await
    }

    /// Open positions for a wallet. A null body means none.
    pub async fn get_positions(&self, address: &str) -> Result<Vec<Position>, ReyaClientError> {
        let url = join_segments(&self.wallet_base, &[address, "positions"])?;
        let positions: Option<Vec<Position>> = self.get_json("reya_positions", url).await?;
        Ok(positions.unwrap_or_default())
    }

    /// Most recent perp executions for a wallet, newest first as upstream
    /// returns them.
    pub async fn get_perp_executions(&self, address: &str) -> Result<Vec<Trade>, ReyaClientError> {
        let mut url = join_segments(&self.wallet_base, &[address, "perpExecutions"])?;
        url.query_pairs_mut()
            .append_pair("limit", &EXECUTIONS_LIMIT.to_string());

        let started = Instant::now();
        let result = self.fetch_executions(url).await;
        record_upstream("reya_executions", started, result.is_ok());
        Ok(result?.data.unwrap_or_default())
    }

    async fn fetch_executions(&self, url: Url) -> Result<ExecutionsPage, ReyaClientError> {
        let resp = self.http.get(url).send().await?;
        if resp.status() == StatusCode::GATEWAY_TIMEOUT {
            return Err(ReyaClientError::Timeout);
        }
        let page: ExecutionsPage = resp.error_for_status()?.json().await?;
        Ok(page)
    }

    pub async fn get_incentives(&self, address: &str) -> Result<IncentivesResponse, ReyaClientError> {
        let url = join_segments(&self.incentives_base, &[address])?;
        self.get_json("reya_incentives", url).await
    }

    /// Hourly close prices for `symbol` up to `end_time_ms`.
    pub async fn get_hourly_closes(
        &self,
        symbol: &str,
        end_time_ms: i64,
    ) -> Result<Vec<Decimal>, ReyaClientError> {
        let mut url = join_segments(&self.history_base, &[symbol, "1h"])?;
        url.query_pairs_mut()
            .append_pair("endTime", &end_time_ms.to_string());

        let history: CandleHistory = self.get_json("reya_candles", url).await?;
        Ok(history.closes())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        source: &'static str,
        url: Url,
    ) -> Result<T, ReyaClientError> {
        let started = Instant::now();
        let result = async {
            let resp = self.http.get(url).send().await?.error_for_status()?;
            let body: T = resp.json().await?;
            Ok::<T, ReyaClientError>(body)
        }
        .await;
        record_upstream(source, started, result.is_ok());
        result
    }
}

fn parse_url(raw: &str) -> Result<Url, ReyaClientError> {
    Url::parse(raw).map_err(|e| ReyaClientError::Unexpected(format!("bad url {raw}: {e}")))
}

/// Append path segments to `base`, percent-encoding each one so a wallet
/// address or symbol can never escape its segment.
fn join_segments(base: &str, segments: &[&str]) -> Result<Url, ReyaClientError> {
    let mut url = parse_url(base)?;
    url.path_segments_mut()
        .map_err(|_| ReyaClientError::Unexpected(format!("url cannot take a path: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
