use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Sibling discount percentage by ordinal position within one order.
///
/// Position 1 is the most expensive enrollment and is never discounted. The
/// last entry covers every position beyond it.
pub const SIBLING_DISCOUNT_RATES: [(usize, Decimal); 4] = [
    (1, dec!(0)),
    (2, dec!(25)),
    (3, dec!(35)),
    (4, dec!(45)),
];

/// Percentage off for the item at 1-based `position`.
pub fn sibling_discount_rate(position: usize) -> Decimal {
    SIBLING_DISCOUNT_RATES
        .iter()
        .rev()
        .find(|(ordinal, _)| position >= *ordinal)
        .map(|(_, rate)| *rate)
        .unwrap_or(Decimal::ZERO)
}
