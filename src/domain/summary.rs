//! Per-account rebate summaries and their tabular row form.

use rust_decimal::Decimal;

use super::money::format_amount;
use super::{AccountId, Category};

/// Breakdown line for one product bucket and asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLine {
    pub category: Category,
    pub asset: String,
    pub amount: Decimal,
    pub usdt_value: Decimal,
}

/// Aggregated rebates for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub account_id: AccountId,
    pub total_usdt_value: Decimal,
    pub lines: Vec<CategoryLine>,
}

impl AccountSummary {
    /// Sum of the USDT value across all breakdown lines.
    #[must_use]
    pub fn lines_total(&self) -> Decimal {
        self.lines.iter().map(|line| line.usdt_value).sum()
    }

    /// Render as header row, one row per line, and a trailing separator.
    #[must_use]
    pub fn to_rows(&self) -> Vec<SummaryRow> {
        let mut rows = Vec::with_capacity(self.lines.len() + 2);
        rows.push(SummaryRow {
            account_id: self.account_id.to_string(),
            category: Category::AccountSummary.label().to_string(),
            rebate_amount: String::new(),
            rebate_asset: String::new(),
            usdt_value: format_amount(self.total_usdt_value),
        });
        rows.extend(self.lines.iter().map(|line| SummaryRow {
            account_id: self.account_id.to_string(),
            category: line.category.label().to_string(),
            rebate_amount: format_amount(line.amount),
            rebate_asset: line.asset.clone(),
            usdt_value: format_amount(line.usdt_value),
        }));
        rows.push(SummaryRow::separator());
        rows
    }
}

/// One row of the summary interchange file, kept as text.
///
/// The disbursement stage reads these back, so fields are not parsed until
/// a row is known to be an account header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryRow {
    pub account_id: String,
    pub category: String,
    pub rebate_amount: String,
    pub rebate_asset: String,
    pub usdt_value: String,
}

impl SummaryRow {
    /// Blank row that terminates an account group.
    #[must_use]
    pub fn separator() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_separator(&self) -> bool {
        [
            &self.account_id,
            &self.category,
            &self.rebate_amount,
            &self.rebate_asset,
            &self.usdt_value,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }

    /// Whether this row is an account header (a disbursement candidate).
    #[must_use]
    pub fn is_account_summary(&self) -> bool {
        Category::from_label(&self.category) == Some(Category::AccountSummary)
    }

    /// Fields in file column order.
    #[must_use]
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.account_id,
            &self.category,
            &self.rebate_amount,
            &self.rebate_asset,
            &self.usdt_value,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rows_are_header_lines_then_separator() {
        let summary = AccountSummary {
            account_id: AccountId::from("1001"),
            total_usdt_value: dec!(3.5),
            lines: vec![CategoryLine {
                category: Category::Spot,
                asset: "BNB".into(),
                amount: dec!(0.01),
                usdt_value: dec!(3.5),
            }],
        };

        let rows = summary.to_rows();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_account_summary());
        assert_eq!(rows[0].usdt_value, "3.50000000");
        assert_eq!(rows[0].rebate_amount, "");
        assert_eq!(rows[1].category, "spot");
        assert_eq!(rows[1].rebate_amount, "0.01000000");
        assert!(rows[2].is_separator());
    }
}
