//! Monetary rounding helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to 2 decimal places, half away from zero.
///
/// The result always carries exactly two decimal places, so `100` becomes `100.00`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("123.454").unwrap()), Decimal::from_str("123.45").unwrap());
/// assert_eq!(round_currency(Decimal::from_str("123.455").unwrap()), Decimal::from_str("123.46").unwrap());
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Returns true if `value` has no fraction of a centavo.
pub(crate) fn is_whole_centavos(value: Decimal) -> bool {
    value.round_dp(2) == value
}

/// Rounds a rate (e.g. an hourly rate) to 4 decimal places, half away from zero.
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}
