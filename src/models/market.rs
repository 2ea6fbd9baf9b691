use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient_decimal;
use crate::analytics::format::product_or_zero;

/// One row of the Reya market-summary snapshot.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, rename = "throttledOraclePrice", deserialize_with = "lenient_decimal")]
    pub oracle_price: Decimal,
    #[serde(default, rename = "volume24h", deserialize_with = "lenient_decimal")]
    pub volume_24h: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub oi_qty: Decimal,
    #[serde(default, rename = "pxChange24h", deserialize_with = "lenient_decimal")]
    pub px_change_24h: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub funding_rate: Decimal,
}

impl MarketSummary {
    pub fn symbol_str(&self) -> &str {
        self.symbol.as_deref().unwrap_or_default()
    }

    /// Notional open interest: quantity times oracle price. Zero when the
    /// product overflows.
    pub fn oi_value(&self) -> Decimal {
        product_or_zero(self.oi_qty, self.oracle_price)
    }
}
