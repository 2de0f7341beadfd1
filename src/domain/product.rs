//! Trading product types and their summary categories.

use std::fmt;

/// Trading product that generated a rebate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductType {
    /// Spot trading.
    Spot,
    /// Cross/isolated margin trading.
    Margin,
    /// Coin-margined (inverse) futures.
    CoinMarginedFutures,
    /// USDT-margined (linear) futures.
    UsdtMarginedFutures,
}

impl ProductType {
    /// Parse a product type from either the canonical kebab-case spelling
    /// or the exchange export spelling (`USDT-futures`, `Coin-futures`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "spot" => Some(Self::Spot),
            "margin" => Some(Self::Margin),
            "coin-futures" | "coin-margined-futures" => Some(Self::CoinMarginedFutures),
            "usdt-futures" | "usdt-margined-futures" => Some(Self::UsdtMarginedFutures),
            _ => None,
        }
    }

    /// Canonical kebab-case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Spot => "spot",
            Self::Margin => "margin",
            Self::CoinMarginedFutures => "coin-margined-futures",
            Self::UsdtMarginedFutures => "usdt-margined-futures",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row category in the summary artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Per-account header row carrying the total USDT value.
    AccountSummary,
    /// Pooled USDT-margined futures rebates.
    UsdtMarginedContract,
    /// Coin-margined futures rebates for one asset.
    CoinMarginedContract,
    /// Margin rebates for one asset.
    Margin,
    /// Spot rebates for one asset.
    Spot,
}

impl Category {
    /// Display label written to the summary file.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AccountSummary => "account summary",
            Self::UsdtMarginedContract => "USDT-margined contract",
            Self::CoinMarginedContract => "coin-margined contract",
            Self::Margin => "margin",
            Self::Spot => "spot",
        }
    }

    /// Parse a label, accepting the localized labels of older summary files.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "account summary" | "账户汇总" => Some(Self::AccountSummary),
            "USDT-margined contract" | "U本位合约" => Some(Self::UsdtMarginedContract),
            "coin-margined contract" | "币本位合约" => Some(Self::CoinMarginedContract),
            "margin" | "杠杆" => Some(Self::Margin),
            "spot" | "现货" => Some(Self::Spot),
            _ => None,
        }
    }
}

impl From<ProductType> for Category {
    fn from(product: ProductType) -> Self {
        match product {
            ProductType::Spot => Self::Spot,
            ProductType::Margin => Self::Margin,
            ProductType::CoinMarginedFutures => Self::CoinMarginedContract,
            ProductType::UsdtMarginedFutures => Self::UsdtMarginedContract,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_export_and_canonical_spellings() {
        assert_eq!(
            ProductType::parse("USDT-futures"),
            Some(ProductType::UsdtMarginedFutures)
        );
        assert_eq!(
            ProductType::parse("Coin-futures"),
            Some(ProductType::CoinMarginedFutures)
        );
        assert_eq!(
            ProductType::parse("usdt_margined_futures"),
            Some(ProductType::UsdtMarginedFutures)
        );
        assert_eq!(ProductType::parse(" Spot "), Some(ProductType::Spot));
        assert_eq!(ProductType::parse("options"), None);
    }

    #[test]
    fn legacy_labels_map_to_categories() {
        assert_eq!(Category::from_label("账户汇总"), Some(Category::AccountSummary));
        assert_eq!(
            Category::from_label("account summary"),
            Some(Category::AccountSummary)
        );
        assert_eq!(Category::from_label(""), None);
    }
}
