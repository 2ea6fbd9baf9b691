pub mod client;
pub mod types;

pub use client::{HyperliquidClient, HyperliquidClientError};
pub use types::{AssetCtx, MetaAndAssetCtxs, UniverseAsset};
