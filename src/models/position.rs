use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{lenient_decimal, Side};

/// An open perp position as reported by the Reya wallet API.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub side: Side,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub qty: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub avg_entry_price: Decimal,
}
