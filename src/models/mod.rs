pub mod market;
pub mod points;
pub mod position;
pub mod trade;

pub use market::MarketSummary;
pub use points::PointsRecord;
pub use position::Position;
pub use trade::Trade;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::analytics::format::parse_decimal;

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// Order / position side. Reya marks the long (buy) side with `"B"`; every
/// other value is the short (sell) side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    #[default]
    Sell,
}

impl Side {
    pub fn from_api_str(s: &str) -> Self {
        if s == "B" {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    pub fn is_long(self) -> bool {
        self == Side::Buy
    }

    /// Label used by the positions panel.
    pub fn position_label(self) -> &'static str {
        match self {
            Side::Buy => "LONG",
            Side::Sell => "SHORT",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

impl<'de> Deserialize<'de> for Side {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Side::from_api_str).unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Lenient numeric fields
// ---------------------------------------------------------------------------

/// Deserialize a numeric field that upstream sends as a string, a JSON
/// number, or not at all. Anything that does not parse becomes zero.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => parse_decimal(&s),
        serde_json::Value::Number(n) => parse_decimal(&n.to_string()),
        _ => Decimal::ZERO,
    })
}
