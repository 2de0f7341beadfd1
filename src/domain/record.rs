//! Raw per-order rebate records.

use rust_decimal::Decimal;

use super::{AccountId, ProductType};

/// One rebate credit as exported by the exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebateRecord {
    pub account_id: AccountId,
    pub product_type: ProductType,
    /// Currency the rebate was paid in.
    pub rebate_asset: String,
    /// Rebate quantity in `rebate_asset` units.
    pub rebate_amount: Decimal,
    /// Rebate value normalized to USDT by the exchange.
    pub rebate_value_usdt: Decimal,
}

impl RebateRecord {
    pub fn new(
        account_id: impl Into<AccountId>,
        product_type: ProductType,
        rebate_asset: impl Into<String>,
        rebate_amount: Decimal,
        rebate_value_usdt: Decimal,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            product_type,
            rebate_asset: rebate_asset.into(),
            rebate_amount,
            rebate_value_usdt,
        }
    }
}
