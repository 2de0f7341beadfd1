//! Fixed-point helpers for rebate and payout amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits used for every amount written or transferred.
pub const AMOUNT_DP: u32 = 8;

/// Format an amount with exactly eight fractional digits.
#[must_use]
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = value.round_dp(AMOUNT_DP);
    rounded.rescale(AMOUNT_DP);
    rounded.to_string()
}

/// Truncate an amount toward zero at the eighth fractional digit.
#[must_use]
pub fn floor_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(AMOUNT_DP, RoundingStrategy::ToZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn format_pads_to_eight_places() {
        assert_eq!(format_amount(dec!(60)), "60.00000000");
        assert_eq!(format_amount(dec!(0.1)), "0.10000000");
        assert_eq!(format_amount(dec!(1.123456789)), "1.12345679");
    }

    #[test]
    fn floor_truncates_instead_of_rounding() {
        assert_eq!(floor_amount(dec!(0.999999999)), dec!(0.99999999));
        assert_eq!(floor_amount(dec!(30)), dec!(30));
    }
}
