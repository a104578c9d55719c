use refund_core::calculations::common::round_half_up;
use rust_decimal::Decimal;

/// Formats an amount with exactly two fractional digits (`1000` -> `"1000.00"`).
pub fn format_amount(d: Decimal) -> String {
    round_half_up(d).to_string()
}

/// Formats an amount as dollars (`"$1000.00"`).
pub fn format_dollars(d: Decimal) -> String {
    format!("${}", format_amount(d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn format_amount_pads_to_two_places() {
        assert_eq!(format_amount(dec!(1000)), "1000.00");
        assert_eq!(format_amount(dec!(2.5)), "2.50");
        assert_eq!(format_amount(dec!(0)), "0.00");
    }

    #[test]
    fn format_amount_rounds_extra_places_half_up() {
        assert_eq!(format_amount(dec!(2.665)), "2.67");
    }

    #[test]
    fn format_amount_shows_sub_cent_input_in_cents() {
        assert_eq!(format_amount(dec!(0.004)), "0.00");
        assert_eq!(format_amount(dec!(10.005)), "10.01");
    }

    #[test]
    fn format_dollars_prefixes_sign() {
        assert_eq!(format_dollars(dec!(550)), "$550.00");
    }
}
