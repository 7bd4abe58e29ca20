//! Money parsing, rounding and display formatting.
//!
//! All monetary math uses `rust_decimal` so the 2-decimal amounts users
//! type survive arithmetic exactly. Numeric form fields arrive as raw
//! text and are coerced here; nothing in this module panics on bad input.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol a fresh document starts with.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Parse a raw edit-boundary amount.
///
/// Invalid and negative input both coerce to zero: monetary fields are
/// non-negative by contract, and a half-typed value must never reject an
/// edit or poison a computation.
pub fn parse_amount(raw: &str) -> Decimal {
    match raw.trim().parse::<Decimal>() {
        Ok(value) if value.is_sign_negative() => Decimal::ZERO,
        Ok(value) => value,
        Err(_) => Decimal::ZERO,
    }
}

/// Round to the nearest whole currency unit, half away from zero.
pub fn round_half_up(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount with the currency symbol, grouped digits and exactly
/// two decimals.
///
/// Grouping follows the en-IN convention (last group of three, then
/// groups of two): `12,34,567.89`. The sign is kept for negative values
/// such as round-offs. Never panics.
pub fn format_amount(symbol: &str, amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let magnitude = rounded.abs();
    let text = format!("{magnitude:.2}");
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let sign = if rounded.is_sign_negative() && !magnitude.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{symbol}{sign}{}.{frac_part}", group_digits(int_part))
}

/// Insert en-IN grouping separators into an unsigned digit string.
fn group_digits(int_part: &str) -> String {
    let mut reversed = String::with_capacity(int_part.len() + int_part.len() / 2);
    let mut count = 0;
    let mut group_len = 3;
    for ch in int_part.chars().rev() {
        if count == group_len {
            reversed.push(',');
            count = 0;
            group_len = 2;
        }
        reversed.push(ch);
        count += 1;
    }
    reversed.chars().rev().collect()
}
