pub mod analytics;
pub mod api;
pub mod config;
pub mod errors;
pub mod hyperliquid;
pub mod metrics;
pub mod models;
pub mod navigation;
pub mod reya;
pub mod services;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::hyperliquid::HyperliquidClient;
use crate::reya::ReyaClient;
use crate::services::{ChatBridge, WalletStore};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub reya: ReyaClient,
    pub hyperliquid: HyperliquidClient,
    pub chat: Arc<ChatBridge>,
    pub wallet_store: Arc<WalletStore>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}

impl AppState {
    /// Wire every upstream client from `config`, sharing one HTTP client.
    pub fn new(
        config: AppConfig,
        metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    ) -> Self {
        let http = reqwest::Client::new();
        Self {
            reya: ReyaClient::new(http.clone(), &config),
            hyperliquid: HyperliquidClient::new(http.clone(), config.hyperliquid_info_url.clone()),
            chat: Arc::new(ChatBridge::new(http, config.chat_endpoint.clone())),
            wallet_store: Arc::new(WalletStore::new(config.saved_wallet_path.clone())),
            metrics_handle,
            config,
        }
    }
}
