//! Money rendering.
//!
//! Prices and totals travel as JSON numbers and are held as exact decimals.
//! Rendering always uses two fraction digits, rounding half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal amount in the store currency.
pub type Money = Decimal;

/// Render an amount with exactly two fraction digits: `20` → `"20.00"`.
pub fn format_amount(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Render an amount as a price label: `20` → `"$20.00"`.
pub fn format_price(amount: Money) -> String {
    format!("${}", format_amount(amount))
}
