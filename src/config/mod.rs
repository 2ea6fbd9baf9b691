use std::env;
use std::path::PathBuf;

const DEFAULT_REYA_MARKETS_URL: &str = "https://api.reya.xyz/v2/markets/summary";
const DEFAULT_REYA_WALLET_BASE: &str = "https://api.reya.xyz/v2/wallet";
const DEFAULT_REYA_INCENTIVES_BASE: &str = "https://api.reya.xyz/api/incentives/wallet";
const DEFAULT_REYA_HISTORY_BASE: &str = "https://api.reya.xyz/v2/candleHistory";
const DEFAULT_HYPERLIQUID_INFO_URL: &str = "https://api.hyperliquid.xyz/info";
const DEFAULT_CHAT_ENDPOINT: &str = "http://127.0.0.1:3000/chat";
const DEFAULT_SAVED_WALLET_PATH: &str = "data/saved_wallet.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Bearer token for /api routes; empty disables auth (dev mode)
    pub api_token: Option<String>,

    // Reya endpoints
    pub reya_markets_url: String,
    pub reya_wallet_base: String,
    pub reya_incentives_base: String,
    pub reya_history_base: String,

    // Hyperliquid
    pub hyperliquid_info_url: String,

    // Chat answerer
    pub chat_endpoint: String,

    // Last-used wallet address file
    pub saved_wallet_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a valid port number: {e}"))?,
            api_token: env::var("API_TOKEN").ok().filter(|t| !t.trim().is_empty()),

            reya_markets_url: env_or("REYA_MARKETS_URL", DEFAULT_REYA_MARKETS_URL),
            reya_wallet_base: env_or("REYA_WALLET_BASE", DEFAULT_REYA_WALLET_BASE),
            reya_incentives_base: env_or("REYA_INCENTIVES_BASE", DEFAULT_REYA_INCENTIVES_BASE),
            reya_history_base: env_or("REYA_HISTORY_BASE", DEFAULT_REYA_HISTORY_BASE),

            hyperliquid_info_url: env_or("HYPERLIQUID_INFO_URL", DEFAULT_HYPERLIQUID_INFO_URL),

            chat_endpoint: env_or("CHAT_ENDPOINT", DEFAULT_CHAT_ENDPOINT),

            saved_wallet_path: PathBuf::from(env_or(
                "SAVED_WALLET_PATH",
                DEFAULT_SAVED_WALLET_PATH,
            )),
        })
    }

    /// Config pointing every upstream at a single base URL. Used by tests that
    /// stand up a fake upstream server.
    pub fn with_upstream_base(base: &str, saved_wallet_path: PathBuf) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            api_token: None,
            reya_markets_url: format!("{base}/v2/markets/summary"),
            reya_wallet_base: format!("{base}/v2/wallet"),
            reya_incentives_base: format!("{base}/api/incentives/wallet"),
            reya_history_base: format!("{base}/v2/candleHistory"),
            hyperliquid_info_url: format!("{base}/info"),
            chat_endpoint: format!("{base}/chat"),
            saved_wallet_path,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.into())
}
