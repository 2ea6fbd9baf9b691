use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// The popup's switchable panels. Entering one triggers its load action.
/// The chart panel is not listed: it opens from a market row with a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Markets,
    Overview,
    Arbitrage,
    Wallet,
    Trades,
    Points,
    Chat,
}

impl Panel {
    pub const ALL: [Panel; 7] = [
        Panel::Markets,
        Panel::Overview,
        Panel::Arbitrage,
        Panel::Wallet,
        Panel::Trades,
        Panel::Points,
        Panel::Chat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Panel::Markets => "markets",
            Panel::Overview => "overview",
            Panel::Arbitrage => "arbitrage",
            Panel::Wallet => "wallet",
            Panel::Trades => "trades",
            Panel::Points => "points",
            Panel::Chat => "chat",
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown panel: {0}")]
pub struct UnknownPanel(pub String);

impl FromStr for Panel {
    type Err = UnknownPanel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Panel::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPanel(s.to_string()))
    }
}
