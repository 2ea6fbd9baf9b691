use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::analytics::format::parse_decimal;
use crate::models::{PointsRecord, Trade};

// ---------------------------------------------------------------------------
// Wallet executions (perpExecutions)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExecutionsPage {
    #[serde(default)]
    pub data: Option<Vec<Trade>>,
}

// ---------------------------------------------------------------------------
// Incentives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IncentivesResponse {
    /// Absent, null, or not an object: the wallet has no points.
    #[serde(default, deserialize_with = "object_or_none")]
    pub points: Option<PointsRecord>,
}

fn object_or_none<'de, D>(deserializer: D) -> Result<Option<PointsRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => Some(map),
        _ => None,
    })
}

// ---------------------------------------------------------------------------
// Candle history
// ---------------------------------------------------------------------------

/// Column-oriented candle history; only the closes are used.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CandleHistory {
    #[serde(default)]
    pub c: Option<Vec<Value>>,
}

impl CandleHistory {
    pub fn closes(&self) -> Vec<Decimal> {
        self.c
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|v| match v {
                Value::String(s) => parse_decimal(s),
                Value::Number(n) => parse_decimal(&n.to_string()),
                _ => Decimal::ZERO,
            })
            .collect()
    }
}
