//! Fixed-point money helpers.
//!
//! Amounts are plain [`Decimal`] values. Every discount is rounded to cents
//! as soon as it is computed, so the per-line amounts on a receipt always add
//! up to the order totals.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::MONEY_DECIMAL_PLACES;
use crate::errors::{Error, Result};

/// A currency amount with two fractional digits.
pub type Money = Decimal;

/// Rounds to cents, half away from zero, and pins the scale to two digits.
pub fn round_money(amount: Decimal) -> Money {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}

/// `percentage`% of `amount`, rounded to cents.
pub fn percentage_of(amount: Money, percentage: Decimal) -> Money {
    round_money(amount * percentage / Decimal::ONE_HUNDRED)
}

/// Parses a money amount from text such as `"25.00"`.
pub fn parse_money(value: &str) -> Result<Money> {
    let amount = Decimal::from_str(value.trim())?;
    if amount.is_sign_negative() {
        return Err(Error::invalid_input(format!(
            "Money amount cannot be negative: {}",
            value
        )));
    }
    Ok(round_money(amount))
}
