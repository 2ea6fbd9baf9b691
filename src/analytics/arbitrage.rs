use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::format::{clean_symbol, fixed, Tone};
use crate::hyperliquid::MetaAndAssetCtxs;
use crate::models::MarketSummary;

/// Funding is quoted hourly; the scanner annualizes it linearly
/// (hours per day × days per year), no compounding.
const HOURS_PER_DAY: i64 = 24;
const DAYS_PER_YEAR: i64 = 365;

/// One matched symbol with both annualized funding rates.
#[derive(Debug, Clone, Serialize)]
pub struct ArbRow {
    pub symbol: String,
    pub reya_apr: Decimal,
    pub reya_apr_display: String,
    pub reya_tone: Tone,
    pub hyperliquid_apr: Decimal,
    pub hyperliquid_apr_display: String,
    pub hyperliquid_tone: Tone,
    /// Absolute difference between the two rates. Never negative.
    pub spread: Decimal,
    pub spread_display: String,
}

/// Hourly rate to a yearly percentage: `rate × 24 × 365 × 100`. A rate too
/// large to annualize counts as zero.
pub fn annualize(hourly_rate: Decimal) -> Decimal {
    hourly_rate
        .checked_mul(Decimal::from(HOURS_PER_DAY * DAYS_PER_YEAR))
        .and_then(|yearly| yearly.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Hyperliquid coin name -> annualized funding. Later duplicates win.
pub fn funding_map(ctxs: &MetaAndAssetCtxs) -> HashMap<String, Decimal> {
    ctxs.assets()
        .map(|(name, ctx)| (name.to_string(), annualize(ctx.funding)))
        .collect()
}

/// Join Reya markets against the Hyperliquid funding map. Reya order is kept;
/// symbols Hyperliquid does not list are dropped.
pub fn scan(reya: &[MarketSummary], hyperliquid: &HashMap<String, Decimal>) -> Vec<ArbRow> {
    reya.iter()
        .filter_map(|m| {
            let symbol = clean_symbol(m.symbol_str());
            let hl_apr = *hyperliquid.get(&symbol)?;
            let reya_apr = annualize(m.funding_rate);
            let spread = hl_apr
                .checked_sub(reya_apr)
                .map(|d| d.abs())
                .unwrap_or(Decimal::ZERO);

            Some(ArbRow {
                reya_apr_display: format!("{}%", fixed(reya_apr, 1)),
                reya_tone: Tone::of_funding(reya_apr),
                hyperliquid_apr_display: format!("{}%", fixed(hl_apr, 1)),
                hyperliquid_tone: Tone::of_funding(hl_apr),
                spread_display: format!("{}%", fixed(spread, 1)),
                symbol,
                reya_apr,
                hyperliquid_apr: hl_apr,
                spread,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
