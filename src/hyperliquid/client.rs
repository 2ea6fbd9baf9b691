use std::time::Instant;

use reqwest::Client;
use thiserror::Error;

use super::types::{InfoRequest, MetaAndAssetCtxs};
use crate::metrics::record_upstream;

#[derive(Debug, Error)]
pub enum HyperliquidClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Read-only client for the Hyperliquid `/info` endpoint.
#[derive(Debug, Clone)]
pub struct HyperliquidClient {
    http: Client,
    info_url: String,
}

impl HyperliquidClient {
    pub fn new(http: Client, info_url: impl Into<String>) -> Self {
        Self {
            http,
            info_url: info_url.into(),
        }
    }

    /// Perp universe plus live asset contexts (funding, OI, oracle price).
    pub async fn get_meta_and_asset_ctxs(&self) -> Result<MetaAndAssetCtxs, HyperliquidClientError> {
        let started = Instant::now();
        let result = self.post_info(&InfoRequest::meta_and_asset_ctxs()).await;
        record_upstream("hyperliquid_info", started, result.is_ok());
        result
    }

    async fn post_info(&self, request: &InfoRequest) -> Result<MetaAndAssetCtxs, HyperliquidClientError> {
        let resp = self
            .http
            .post(&self.info_url)
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        let body = resp.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            HyperliquidClientError::Unexpected(format!("{} response: {e}", request.request_type))
        })
    }
}
