//! Rebate aggregation service.
//!
//! Groups raw rebate records by account and by product bucket, producing the
//! summary artifact consumed by the disbursement job.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::{
    AccountId, AccountSummary, Category, CategoryLine, ProductType, RebateRecord, SummaryRow,
};
use crate::error::InputError;

/// Asset label of the pooled USDT-margined futures line.
const POOLED_ASSET: &str = "USDT";

/// Buckets broken out per asset, in output order.
const PER_ASSET_PRODUCTS: [ProductType; 3] = [
    ProductType::CoinMarginedFutures,
    ProductType::Margin,
    ProductType::Spot,
];

/// Single-pass aggregator over a batch of rebate records.
#[derive(Debug, Default, Clone, Copy)]
pub struct RebateAggregator;

impl RebateAggregator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Summarize `records` per account, ordered by ascending account id.
    ///
    /// Accounts whose summed USDT value is exactly zero are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Overflow`] if an account's sums leave the decimal
    /// range.
    pub fn aggregate(&self, records: &[RebateRecord]) -> Result<Vec<AccountSummary>, InputError> {
        let mut by_account: BTreeMap<&AccountId, Vec<&RebateRecord>> = BTreeMap::new();
        for record in records {
            by_account.entry(&record.account_id).or_default().push(record);
        }

        let accounts = by_account.len();
        let mut summaries = Vec::with_capacity(accounts);
        for (account_id, records) in by_account {
            if let Some(summary) = summarize(account_id, &records)? {
                summaries.push(summary);
            }
        }

        info!(
            records = records.len(),
            accounts,
            summarized = summaries.len(),
            "Aggregated rebate records"
        );
        Ok(summaries)
    }

    /// Flatten summaries into file rows, one separator after each account.
    #[must_use]
    pub fn render(&self, summaries: &[AccountSummary]) -> Vec<SummaryRow> {
        summaries.iter().flat_map(AccountSummary::to_rows).collect()
    }
}

fn checked_sum(
    account_id: &AccountId,
    column: &'static str,
    values: impl IntoIterator<Item = Decimal>,
) -> Result<Decimal, InputError> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
        .ok_or_else(|| InputError::Overflow {
            account_id: account_id.to_string(),
            column,
        })
}

fn summarize(
    account_id: &AccountId,
    records: &[&RebateRecord],
) -> Result<Option<AccountSummary>, InputError> {
    let total_usdt_value = checked_sum(
        account_id,
        "rebate_value_usdt",
        records.iter().map(|r| r.rebate_value_usdt),
    )?;
    if total_usdt_value.is_zero() {
        debug!(account_id = %account_id, "Skipping account with zero rebate value");
        return Ok(None);
    }

    let mut lines = Vec::new();

    let pooled = checked_sum(
        account_id,
        "rebate_value_usdt",
        records
            .iter()
            .filter(|r| r.product_type == ProductType::UsdtMarginedFutures)
            .map(|r| r.rebate_value_usdt),
    )?;
    if pooled > Decimal::ZERO {
        lines.push(CategoryLine {
            category: Category::UsdtMarginedContract,
            asset: POOLED_ASSET.to_string(),
            amount: pooled,
            usdt_value: pooled,
        });
    }

    for product in PER_ASSET_PRODUCTS {
        let mut by_asset: BTreeMap<&str, Vec<&RebateRecord>> = BTreeMap::new();
        for record in records.iter().filter(|r| r.product_type == product) {
            by_asset
                .entry(record.rebate_asset.as_str())
                .or_default()
                .push(record);
        }

        for (asset, bucket) in by_asset {
            let amount = checked_sum(
                account_id,
                "rebate_amount",
                bucket.iter().map(|r| r.rebate_amount),
            )?;
            let usdt_value = checked_sum(
                account_id,
                "rebate_value_usdt",
                bucket.iter().map(|r| r.rebate_value_usdt),
            )?;
            if amount > Decimal::ZERO {
                lines.push(CategoryLine {
                    category: Category::from(product),
                    asset: asset.to_string(),
                    amount,
                    usdt_value,
                });
            }
        }
    }

    debug!(
        account_id = %account_id,
        total = %total_usdt_value,
        lines = lines.len(),
        "Summarized account"
    );

    Ok(Some(AccountSummary {
        account_id: account_id.clone(),
        total_usdt_value,
        lines,
    }))
}
