use serde_json::{Map, Value};

/// Incentive points keyed by period label, each a map of metric name to
/// value. Key order follows the upstream response.
pub type PointsRecord = Map<String, Value>;
