use rust_decimal::Decimal;
use serde::Serialize;

use super::format::{clean_symbol, fixed, format_currency, lenient_sum, signed_percent, Tone};
use crate::models::MarketSummary;

/// Length of the gainers and losers lists.
pub const MOVERS_LEN: usize = 5;

/// A row of the live market list.
#[derive(Debug, Clone, Serialize)]
pub struct MarketRow {
    pub symbol: String,
    /// Raw exchange symbol, used to open the chart.
    pub market: String,
    pub price: Decimal,
    pub price_display: String,
    pub change: Decimal,
    pub change_display: String,
    pub tone: Tone,
    pub volume_24h: Decimal,
}

/// Per-market figures the overview ranks on.
#[derive(Debug, Clone, Serialize)]
pub struct MarketStat {
    pub symbol: String,
    pub volume: Decimal,
    pub oi_value: Decimal,
    pub change: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct Highlight {
    pub symbol: String,
    pub value: Decimal,
    pub value_display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoverRow {
    pub symbol: String,
    pub change: Decimal,
    pub change_display: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total_volume: Decimal,
    pub total_volume_display: String,
    pub total_oi: Decimal,
    pub total_oi_display: String,
    pub top_volume: Option<Highlight>,
    pub top_oi: Option<Highlight>,
    pub gainers: Vec<MoverRow>,
    pub losers: Vec<MoverRow>,
}

/// Markets whose symbol contains `search` (case-insensitive), highest 24h
/// volume first. Entries without a symbol never show up.
pub fn market_list(markets: &[MarketSummary], search: &str) -> Vec<MarketRow> {
    let term = search.to_lowercase();

    let mut matching: Vec<&MarketSummary> = markets
        .iter()
        .filter(|m| {
            let symbol = m.symbol_str();
            !symbol.is_empty() && symbol.to_lowercase().contains(&term)
        })
        .collect();
    matching.sort_by(|a, b| b.volume_24h.cmp(&a.volume_24h));

    matching
        .into_iter()
        .map(|m| MarketRow {
            symbol: clean_symbol(m.symbol_str()),
            market: m.symbol_str().to_string(),
            price: m.oracle_price,
            price_display: format!("${}", fixed(m.oracle_price, 3)),
            change: m.px_change_24h,
            change_display: format!("{}%", fixed(m.px_change_24h, 2)),
            tone: Tone::of(m.px_change_24h),
            volume_24h: m.volume_24h,
        })
        .collect()
}

pub fn market_stats(markets: &[MarketSummary]) -> Vec<MarketStat> {
    markets
        .iter()
        .map(|m| MarketStat {
            symbol: clean_symbol(m.symbol_str()),
            volume: m.volume_24h,
            oi_value: m.oi_value(),
            change: m.px_change_24h,
        })
        .collect()
}

/// First item holding the maximum of `key`.
fn first_max<F>(stats: &[MarketStat], key: F) -> Option<&MarketStat>
where
    F: Fn(&MarketStat) -> Decimal,
{
    stats.iter().fold(None, |best, s| match best {
        Some(b) if key(b) >= key(s) => Some(b),
        _ => Some(s),
    })
}

/// Top movers by 24h change, best first.
pub fn gainers(stats: &[MarketStat]) -> Vec<MarketStat> {
    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.change.cmp(&a.change));
    sorted.truncate(MOVERS_LEN);
    sorted
}

/// Bottom movers by 24h change, worst first.
pub fn losers(stats: &[MarketStat]) -> Vec<MarketStat> {
    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| a.change.cmp(&b.change));
    sorted.truncate(MOVERS_LEN);
    sorted
}

pub fn overview(markets: &[MarketSummary]) -> Overview {
    let stats = market_stats(markets);

    let total_volume = lenient_sum(stats.iter().map(|s| s.volume));
    let total_oi = lenient_sum(stats.iter().map(|s| s.oi_value));

    let top_volume = first_max(&stats, |s| s.volume).map(|s| Highlight {
        symbol: s.symbol.clone(),
        value: s.volume,
        value_display: format_currency(s.volume),
    });
    let top_oi = first_max(&stats, |s| s.oi_value).map(|s| Highlight {
        symbol: s.symbol.clone(),
        value: s.oi_value,
        value_display: format_currency(s.oi_value),
    });

    Overview {
        total_volume,
        total_volume_display: format_currency(total_volume),
        total_oi,
        total_oi_display: format_currency(total_oi),
        top_volume,
        top_oi,
        gainers: gainers(&stats).into_iter().map(mover_row).collect(),
        losers: losers(&stats).into_iter().map(mover_row).collect(),
    }
}

fn mover_row(stat: MarketStat) -> MoverRow {
    MoverRow {
        change_display: signed_percent(stat.change),
        tone: Tone::of(stat.change),
        change: stat.change,
        symbol: stat.symbol,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
