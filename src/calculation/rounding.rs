//! Rounding policies.
//!
//! Display figures round half-up to cents. Withholding always rounds down to
//! the cent. The two must not be mixed.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to 2 decimal places, midpoints away from zero.
///
/// # Example
///
/// ```
/// use casual_pay::calculation::round_half_up_2;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_half_up_2(Decimal::from_str("2.345").unwrap()), Decimal::from_str("2.35").unwrap());
/// assert_eq!(round_half_up_2(Decimal::from_str("2.344").unwrap()), Decimal::from_str("2.34").unwrap());
/// ```
pub fn round_half_up_2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds down to the cent.
pub fn floor_to_cent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_half_up_rounds_midpoint_up() {
        assert_eq!(round_half_up_2(dec("0.125")), dec("0.13"));
        assert_eq!(round_half_up_2(dec("160.3")), dec("160.30"));
        assert_eq!(round_half_up_2(dec("7.8333333")), dec("7.83"));
    }

    #[test]
    fn test_floor_never_rounds_up() {
        assert_eq!(floor_to_cent(dec("142.980973")), dec("142.98"));
        assert_eq!(floor_to_cent(dec("0.999")), dec("0.99"));
        assert_eq!(floor_to_cent(dec("12")), dec("12"));
    }

    #[test]
    fn test_policies_differ_on_the_same_input() {
        let value = dec("10.005");
        assert_eq!(round_half_up_2(value), dec("10.01"));
        assert_eq!(floor_to_cent(value), dec("10.00"));
    }
}
