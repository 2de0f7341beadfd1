//! Payout computation for disbursement intents.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::money::floor_amount;
use super::AccountId;

/// Share of the rebate value paid out, and the minimum transfer size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayoutPolicy {
    numerator: Decimal,
    denominator: Decimal,
    minimum: Decimal,
}

impl PayoutPolicy {
    /// Create a policy paying `numerator / denominator` of the USDT value.
    ///
    /// Callers validate that the denominator is non-zero; configuration
    /// loading rejects it.
    #[must_use]
    pub const fn new(numerator: Decimal, denominator: Decimal, minimum: Decimal) -> Self {
        Self {
            numerator,
            denominator,
            minimum,
        }
    }

    /// Payout for an account's total value, truncated at 8 places.
    ///
    /// `None` when the product leaves the decimal range or the denominator
    /// is zero.
    #[must_use]
    pub fn payout_for(&self, usdt_value: Decimal) -> Option<Decimal> {
        usdt_value
            .checked_mul(self.numerator)?
            .checked_div(self.denominator)
            .map(floor_amount)
    }

    /// Whether `amount` is large enough to be transferred.
    #[must_use]
    pub fn meets_minimum(&self, amount: Decimal) -> bool {
        amount >= self.minimum
    }

    #[must_use]
    pub const fn minimum(&self) -> Decimal {
        self.minimum
    }
}

impl Default for PayoutPolicy {
    fn default() -> Self {
        Self::new(dec!(25), dec!(30), Decimal::ONE)
    }
}

/// A transfer the engine intends to make for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisbursementIntent {
    pub account_id: AccountId,
    pub usdt_value: Decimal,
    pub payout_amount: Decimal,
    pub destination: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payout_is_five_sixths_truncated() {
        let policy = PayoutPolicy::default();

        assert_eq!(policy.payout_for(dec!(36.00000000)), Some(dec!(30)));
        assert_eq!(policy.payout_for(dec!(60)), Some(dec!(50)));
        assert_eq!(policy.payout_for(dec!(1.19999999)), Some(dec!(0.99999999)));
        assert_eq!(policy.payout_for(dec!(1)), Some(dec!(0.83333333)));
    }

    #[test]
    fn minimum_is_inclusive() {
        let policy = PayoutPolicy::default();

        assert!(policy.meets_minimum(dec!(1)));
        assert!(!policy.meets_minimum(dec!(0.99999999)));
        assert!(policy.meets_minimum(policy.payout_for(dec!(1.2)).unwrap()));
    }

    #[test]
    fn payout_is_monotonic() {
        let policy = PayoutPolicy::default();
        let values = [dec!(0), dec!(0.5), dec!(1.2), dec!(1.20000001), dec!(99.99)];

        for pair in values.windows(2) {
            assert!(policy.payout_for(pair[0]) <= policy.payout_for(pair[1]));
        }
    }

    #[test]
    fn out_of_range_products_have_no_payout() {
        let policy = PayoutPolicy::default();

        assert_eq!(policy.payout_for(Decimal::MAX), None);
        assert_eq!(PayoutPolicy::new(dec!(1), Decimal::ZERO, Decimal::ONE).payout_for(dec!(5)), None);
    }
}
