use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::lenient_decimal;

// ---------------------------------------------------------------------------
// metaAndAssetCtxs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct InfoRequest {
    #[serde(rename = "type")]
    pub request_type: String,
}

impl InfoRequest {
    pub fn meta_and_asset_ctxs() -> Self {
        Self {
            request_type: "metaAndAssetCtxs".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UniverseAsset {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Meta {
    #[serde(default)]
    universe: Vec<UniverseAsset>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCtx {
    /// Hourly funding rate.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub funding: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub open_interest: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub oracle_px: Decimal,
}

/// The `[meta, assetCtxs]` pair. Universe entry `i` describes context
/// entry `i`; a null context means no live data for that asset.
#[derive(Debug, Clone, Default)]
pub struct MetaAndAssetCtxs {
    pub universe: Vec<UniverseAsset>,
    pub asset_ctxs: Vec<Option<AssetCtx>>,
}

impl MetaAndAssetCtxs {
    /// Pairs of (coin name, context) for every asset with live data.
    pub fn assets(&self) -> impl Iterator<Item = (&str, &AssetCtx)> + '_ {
        self.universe
            .iter()
            .zip(self.asset_ctxs.iter())
            .filter_map(|(u, ctx)| ctx.as_ref().map(|c| (u.name.as_str(), c)))
    }
}

impl<'de> Deserialize<'de> for MetaAndAssetCtxs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut parts = Vec::<Value>::deserialize(deserializer)?.into_iter();

        let universe = match parts.next() {
            None | Some(Value::Null) => Vec::new(),
            Some(meta) => {
                serde_json::from_value::<Meta>(meta)
                    .map_err(de::Error::custom)?
                    .universe
            }
        };
        let asset_ctxs = match parts.next() {
            None | Some(Value::Null) => Vec::new(),
            Some(ctxs) => serde_json::from_value(ctxs).map_err(de::Error::custom)?,
        };

        Ok(Self {
            universe,
            asset_ctxs,
        })
    }
}
