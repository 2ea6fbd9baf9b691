use std::collections::HashMap;

use chrono::DateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use super::format::{
    clean_symbol, fixed, grouped, lenient_sum, parse_decimal, period_label, product_or_zero, Tone,
};
use crate::models::{MarketSummary, PointsRecord, Position, Side, Trade};

pub const ENTER_ADDRESS: &str = "Enter address";
pub const NO_POSITIONS: &str = "No open positions";
pub const NO_TRADES: &str = "No trades found";
pub const NO_POINTS: &str = "No data";

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PositionRow {
    pub symbol: String,
    pub side: Side,
    pub side_label: &'static str,
    pub qty: Decimal,
    pub qty_display: String,
    pub entry_price: Decimal,
    pub entry_display: String,
    pub current_price: Decimal,
    pub current_display: String,
    pub pnl: Decimal,
    pub pnl_display: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionsView {
    pub positions: Vec<PositionRow>,
    pub total_pnl: Option<Decimal>,
    pub total_pnl_display: Option<String>,
    pub total_tone: Option<Tone>,
    pub notice: Option<&'static str>,
}

impl PositionsView {
    pub fn notice(notice: &'static str) -> Self {
        Self {
            positions: Vec::new(),
            total_pnl: None,
            total_pnl_display: None,
            total_tone: None,
            notice: Some(notice),
        }
    }
}

/// Unrealized PnL against `current`: longs gain as price rises, shorts as it
/// falls. Zero when the figures are too large to represent.
pub fn position_pnl(side: Side, entry: Decimal, current: Decimal, qty: Decimal) -> Decimal {
    let move_in_favour = if side.is_long() {
        current.checked_sub(entry)
    } else {
        entry.checked_sub(current)
    };
    move_in_favour
        .map(|delta| product_or_zero(delta, qty))
        .unwrap_or(Decimal::ZERO)
}

/// Raw exchange symbol -> oracle price. Zero prices are left out so the
/// position falls back to its entry price.
pub fn price_index(markets: &[MarketSummary]) -> HashMap<&str, Decimal> {
    markets
        .iter()
        .filter_map(|m| {
            let symbol = m.symbol.as_deref()?;
            (!m.oracle_price.is_zero()).then_some((symbol, m.oracle_price))
        })
        .collect()
}

pub fn positions_view(positions: &[Position], markets: &[MarketSummary]) -> PositionsView {
    if positions.is_empty() {
        return PositionsView::notice(NO_POSITIONS);
    }

    let prices = price_index(markets);
    let rows: Vec<PositionRow> = positions
        .iter()
        .map(|p| {
            let raw_symbol = p.symbol.as_deref().unwrap_or_default();
            let current = prices
                .get(raw_symbol)
                .copied()
                .unwrap_or(p.avg_entry_price);
            let pnl = position_pnl(p.side, p.avg_entry_price, current, p.qty);

            PositionRow {
                symbol: clean_symbol(raw_symbol),
                side: p.side,
                side_label: p.side.position_label(),
                qty: p.qty,
                qty_display: fixed(p.qty, 3),
                entry_price: p.avg_entry_price,
                entry_display: fixed(p.avg_entry_price, 2),
                current_price: current,
                current_display: fixed(current, 2),
                pnl,
                pnl_display: fixed(pnl, 2),
                tone: Tone::of(pnl),
            }
        })
        .collect();

    let total = lenient_sum(rows.iter().map(|r| r.pnl));
    PositionsView {
        positions: rows,
        total_pnl: Some(total),
        total_pnl_display: Some(format!("${}", fixed(total, 2))),
        total_tone: Some(Tone::of(total)),
        notice: None,
    }
}

// ---------------------------------------------------------------------------
// Trades
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TradeRow {
    pub time: String,
    pub symbol: String,
    pub side: Side,
    pub tone: Tone,
    pub price: Decimal,
    pub price_display: String,
    pub qty: Decimal,
    pub qty_display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TradesView {
    pub trades: Vec<TradeRow>,
    pub notice: Option<&'static str>,
}

/// `HH:MM:SS` (UTC) for an epoch-seconds timestamp; empty when out of range.
pub fn trade_time(epoch_secs: Decimal) -> String {
    epoch_secs
        .trunc()
        .to_i64()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

pub fn trades_view(trades: &[Trade]) -> TradesView {
    if trades.is_empty() {
        return TradesView {
            trades: Vec::new(),
            notice: Some(NO_TRADES),
        };
    }

    let rows = trades
        .iter()
        .map(|t| TradeRow {
            time: trade_time(t.block_timestamp),
            symbol: clean_symbol(t.symbol.as_deref().unwrap_or_default()),
            side: t.side,
            tone: if t.side.is_long() { Tone::Green } else { Tone::Red },
            price: t.price,
            price_display: fixed(t.price, 2),
            qty: t.qty,
            qty_display: fixed(t.qty, 3),
        })
        .collect();

    TradesView {
        trades: rows,
        notice: None,
    }
}

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PointsRow {
    pub metric: String,
    pub value: Decimal,
    pub value_display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointsCard {
    pub period: String,
    pub rows: Vec<PointsRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointsView {
    pub cards: Vec<PointsCard>,
    pub notice: Option<&'static str>,
}

fn value_decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => parse_decimal(s),
        Value::Number(n) => parse_decimal(&n.to_string()),
        _ => Decimal::ZERO,
    }
}

/// One card per period, rows in upstream order. A missing record is "no
/// data", not an error.
pub fn points_view(points: Option<&PointsRecord>) -> PointsView {
    let Some(points) = points else {
        return PointsView {
            cards: Vec::new(),
            notice: Some(NO_POINTS),
        };
    };

    let cards = points
        .iter()
        .map(|(period, metrics)| {
            let rows = metrics
                .as_object()
                .map(|m| {
                    m.iter()
                        .map(|(metric, raw)| {
                            let value = value_decimal(raw);
                            PointsRow {
                                metric: metric.clone(),
                                value,
                                value_display: grouped(value),
                            }
                        })
                        .collect()
                })
                .unwrap_or_default();

            PointsCard {
                period: period_label(period),
                rows,
            }
        })
        .collect();

    PointsView {
        cards,
        notice: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
