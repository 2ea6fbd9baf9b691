use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Display colour for a value cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Green,
    Red,
}

impl Tone {
    /// Green for zero and above.
    pub fn of(value: Decimal) -> Self {
        if value >= Decimal::ZERO {
            Tone::Green
        } else {
            Tone::Red
        }
    }

    /// Funding cells flip the rule: a positive rate (longs pay) is red.
    pub fn of_funding(rate: Decimal) -> Self {
        if rate > Decimal::ZERO {
            Tone::Red
        } else {
            Tone::Green
        }
    }
}

/// Parse a numeric string, plain or scientific. Anything else is zero.
pub fn parse_decimal(raw: &str) -> Decimal {
    let s = raw.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .unwrap_or(Decimal::ZERO)
}

/// `a × b`, or zero when the product leaves the representable range.
pub fn product_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(Decimal::ZERO)
}

/// Sum that drops any term which would overflow the running total.
pub fn lenient_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.checked_add(v).unwrap_or(acc))
}

/// Fixed-point rendering, rounding half away from zero.
pub fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(dp);
    rounded.to_string()
}

/// `$1.23B`, `$4.56M`, `$7.89K`, else `$0.12`.
pub fn format_currency(value: Decimal) -> String {
    let thousand = Decimal::from(1_000);
    let million = Decimal::from(1_000_000);
    let billion = Decimal::from(1_000_000_000);

    if value >= billion {
        format!("${}B", fixed(value / billion, 2))
    } else if value >= million {
        format!("${}M", fixed(value / million, 2))
    } else if value >= thousand {
        format!("${}K", fixed(value / thousand, 2))
    } else {
        format!("${}", fixed(value, 2))
    }
}

/// Currency formatting straight from an upstream string.
pub fn format_currency_str(raw: &str) -> String {
    format_currency(parse_decimal(raw))
}

/// Strip exchange suffixes so Reya and Hyperliquid symbols line up
/// (`ETHRUSDPERP` -> `ETH`). Only the first occurrence of each suffix goes.
pub fn clean_symbol(symbol: &str) -> String {
    if symbol.is_empty() {
        return "UNKNOWN".into();
    }
    symbol
        .replacen("RUSDPERP", "", 1)
        .replacen("USDT", "", 1)
        .replacen("-PERP", "", 1)
}

/// Change percentage with an explicit `+` for gains: `+1.25%`, `-0.40%`.
pub fn signed_percent(change: Decimal) -> String {
    let sign = if change > Decimal::ZERO { "+" } else { "" };
    format!("{sign}{}%", fixed(change, 2))
}

/// Thousands-grouped number with at most three fraction digits.
pub fn grouped(value: Decimal) -> String {
    let mut rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if rounded.is_sign_negative() {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// `season_1_total` -> `SEASON 1 TOTAL`.
pub fn period_label(period: &str) -> String {
    period.replace('_', " ").to_uppercase()
}
