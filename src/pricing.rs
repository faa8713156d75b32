//! Pricing

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::iso::Currency;

/// Number of decimal places kept for monetary totals.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Round a monetary amount to two decimal places, half away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Price of `quantity` units at `unit_price`.
#[must_use]
pub fn line_subtotal(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price.saturating_mul(Decimal::from(quantity))
}

/// Convert a decimal amount into minor units (cents), rounding half away from zero.
///
/// Returns `None` when the amount does not fit in an `i64`.
#[must_use]
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|value| value.to_i64())
}

/// Format a decimal amount for display, e.g. `$100.00`.
#[must_use]
pub fn format_amount(amount: Decimal, currency: &Currency) -> String {
    match to_minor_units(amount) {
        Some(minor_units) => format_price(minor_units, currency),
        None => format!("{} {}", round_money(amount), currency.iso_alpha_code),
    }
}

/// Format a minor-unit amount into a currency string.
#[must_use]
pub fn format_price(minor_units: i64, currency: &Currency) -> String {
    let abs_minor = minor_units.unsigned_abs();
    let major_units = abs_minor / 100;
    let fractional = abs_minor % 100;
    let sign = if minor_units < 0 { "-" } else { "" };
    let symbol = currency_symbol(currency.iso_alpha_code);

    if symbol.is_empty() {
        format!(
            "{sign}{major_units}.{fractional:02} {}",
            currency.iso_alpha_code
        )
    } else {
        format!("{sign}{symbol}{major_units}.{fractional:02}")
    }
}

fn currency_symbol(currency_code: &str) -> &'static str {
    match currency_code {
        "GBP" => "£",
        "USD" => "$",
        "EUR" => "€",
        "PHP" => "₱",
        _ => "",
    }
}
