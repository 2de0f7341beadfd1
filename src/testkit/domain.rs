//! Builders for domain primitives used across tests.

use rust_decimal::Decimal;

use crate::domain::{Category, SummaryRow};
use crate::port::outbound::exchange::{AccountInfo, AssetBalance};

/// Summary header row for `account_id` with the given USDT value.
#[must_use]
pub fn header_row(account_id: &str, usdt_value: &str) -> SummaryRow {
    SummaryRow {
        account_id: account_id.to_string(),
        category: Category::AccountSummary.label().to_string(),
        rebate_amount: String::new(),
        rebate_asset: String::new(),
        usdt_value: usdt_value.to_string(),
    }
}

/// Breakdown row that the disbursement stage must ignore.
#[must_use]
pub fn line_row(account_id: &str, category: Category, asset: &str, amount: &str) -> SummaryRow {
    SummaryRow {
        account_id: account_id.to_string(),
        category: category.label().to_string(),
        rebate_amount: amount.to_string(),
        rebate_asset: asset.to_string(),
        usdt_value: amount.to_string(),
    }
}

/// Account snapshot holding a single asset.
#[must_use]
pub fn account_info(asset: &str, free: Decimal) -> AccountInfo {
    AccountInfo {
        balances: vec![AssetBalance {
            asset: asset.to_string(),
            free,
            locked: Decimal::ZERO,
        }],
    }
}
