use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{lenient_decimal, Side};

/// A single perp execution from the wallet trade history.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub side: Side,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub qty: Decimal,
    /// Epoch seconds.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub block_timestamp: Decimal,
}
