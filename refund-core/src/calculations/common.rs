//! Common decimal helpers for refund calculations.
//!
//! Every derived currency value is rounded to whole cents as soon as it is
//! produced, so the helpers here are shared by the engine and by input
//! parsing.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept for currency values.
pub const CENT_SCALE: u32 = 2;

/// Rounds a decimal value to whole cents using half-up rounding.
///
/// A value exactly halfway between two cents rounds away from zero, so
/// `2.665` becomes `2.67` where banker's rounding would give `2.66`.
/// The result carries two fractional digits (`50` becomes `50.00`) whenever
/// the value leaves room for them; see [`to_cents`] for the checked form.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use refund_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(2.664)), dec!(2.66));
/// assert_eq!(round_half_up(dec!(2.665)), dec!(2.67));
/// assert_eq!(round_half_up(dec!(2.001)), dec!(2.00));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CENT_SCALE);
    rounded
}

/// Rounds like [`round_half_up`], returning `None` when the value is too
/// large to carry two fractional digits.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use refund_core::calculations::common::to_cents;
///
/// assert_eq!(to_cents(dec!(2.665)), Some(dec!(2.67)));
/// assert_eq!(to_cents(Decimal::MAX), None);
/// ```
pub fn to_cents(value: Decimal) -> Option<Decimal> {
    let rounded = round_half_up(value);
    (rounded.scale() == CENT_SCALE).then_some(rounded)
}

/// Returns the larger of two amounts, preferring `a` when they are equal.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use refund_core::calculations::common::max;
///
/// assert_eq!(max(dec!(300.00), dec!(200.00)), dec!(300.00));
/// assert_eq!(max(dec!(150.00), dec!(200.00)), dec!(200.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a >= b { a } else { b }
}

/// Clamps an amount at zero so a shortfall never shows up as a negative value.
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_midpoint_away_from_zero() {
        assert_eq!(round_half_up(dec!(2.665)), dec!(2.67));
        assert_eq!(round_half_up(dec!(0.125)), dec!(0.13));
    }

    #[test]
    fn round_half_up_differs_from_bankers_rounding() {
        let bankers = dec!(2.665).round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

        assert_eq!(bankers, dec!(2.66));
        assert_eq!(round_half_up(dec!(2.665)), dec!(2.67));
    }

    #[test]
    fn round_half_up_truncates_below_midpoint() {
        assert_eq!(round_half_up(dec!(2.001)), dec!(2.00));
        assert_eq!(round_half_up(dec!(549.994)), dec!(549.99));
    }

    #[test]
    fn round_half_up_keeps_whole_cents() {
        assert_eq!(round_half_up(dec!(550.00)), dec!(550.00));
        assert_eq!(round_half_up(dec!(0)), dec!(0.00));
    }

    #[test]
    fn round_half_up_pads_to_two_places() {
        assert_eq!(round_half_up(dec!(50)).to_string(), "50.00");
        assert_eq!(round_half_up(dec!(2.5)).to_string(), "2.50");
    }

    #[test]
    fn round_half_up_carries_into_dollars() {
        assert_eq!(round_half_up(dec!(99.995)), dec!(100.00));
    }

    // =========================================================================
    // to_cents tests
    // =========================================================================

    #[test]
    fn to_cents_keeps_two_places() {
        let cents = to_cents(dec!(1000)).unwrap();

        assert_eq!(cents.scale(), CENT_SCALE);
        assert_eq!(cents.to_string(), "1000.00");
    }

    #[test]
    fn to_cents_rejects_values_without_room_for_cents() {
        // 29 integer digits leave no room for a fractional part.
        assert_eq!(to_cents(dec!(15845632502852867518708790067)), None);
        assert_eq!(to_cents(Decimal::MAX), None);
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_prefers_larger_value() {
        assert_eq!(max(dec!(300.00), dec!(200.00)), dec!(300.00));
        assert_eq!(max(dec!(200.00), dec!(300.00)), dec!(300.00));
    }

    #[test]
    fn max_handles_equal_values() {
        assert_eq!(max(dec!(200.00), dec!(200.00)), dec!(200.00));
    }

    // =========================================================================
    // non_negative tests
    // =========================================================================

    #[test]
    fn non_negative_clamps_shortfall_to_zero() {
        assert_eq!(non_negative(dec!(-120.50)), Decimal::ZERO);
    }

    #[test]
    fn non_negative_passes_positive_amounts_through() {
        assert_eq!(non_negative(dec!(650.00)), dec!(650.00));
    }
}
