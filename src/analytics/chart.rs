use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use super::format::{clean_symbol, fixed};

pub const CANVAS_WIDTH: f64 = 300.0;
pub const CANVAS_HEIGHT: f64 = 150.0;
/// Vertical span the line may use, and the gap kept under it.
const PLOT_HEIGHT: f64 = 130.0;
const BOTTOM_MARGIN: f64 = 10.0;
/// Closes kept from the end of the candle history.
pub const SPARKLINE_LEN: usize = 40;

pub const UP_COLOR: &str = "#22c55e";
pub const DOWN_COLOR: &str = "#ef4444";

#[derive(Debug, Clone, Serialize)]
pub struct Sparkline {
    pub title: String,
    pub high: Decimal,
    pub high_display: String,
    pub low: Decimal,
    pub low_display: String,
    pub color: &'static str,
    pub width: f64,
    pub height: f64,
    pub points: Vec<(f64, f64)>,
    /// Points in SVG `polyline` form: `x,y x,y ...`.
    pub polyline: String,
}

/// Lay out the last [`SPARKLINE_LEN`] closes on the canvas. `None` when there
/// is nothing to draw.
pub fn sparkline(symbol: &str, closes: &[Decimal]) -> Option<Sparkline> {
    let recent = &closes[closes.len().saturating_sub(SPARKLINE_LEN)..];
    let first = *recent.first()?;
    let last = *recent.last()?;

    let low = recent.iter().copied().min()?;
    let high = recent.iter().copied().max()?;
    let low_f = low.to_f64().unwrap_or(0.0);
    let range = high.to_f64().unwrap_or(low_f) - low_f;
    let steps = recent.len().saturating_sub(1);

    let points: Vec<(f64, f64)> = recent
        .iter()
        .enumerate()
        .map(|(i, close)| {
            let x = if steps == 0 {
                0.0
            } else {
                i as f64 / steps as f64 * CANVAS_WIDTH
            };
            let scaled = if range > 0.0 {
                (close.to_f64().unwrap_or(low_f) - low_f) / range
            } else {
                0.0
            };
            let y = CANVAS_HEIGHT - scaled * PLOT_HEIGHT - BOTTOM_MARGIN;
            (x, y)
        })
        .collect();

    let polyline = points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ");

    Some(Sparkline {
        title: clean_symbol(symbol),
        high,
        high_display: format!("${}", fixed(high, 2)),
        low,
        low_display: format!("${}", fixed(low, 2)),
        color: if last >= first { UP_COLOR } else { DOWN_COLOR },
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        points,
        polyline,
    })
}
