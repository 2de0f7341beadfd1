//! Exchange port for balance queries and withdrawals.
//!
//! This module defines the traits for interacting with the exchange that
//! holds the rebate pool. A session is a short-lived capability handle: the
//! disbursement engine asks a [`SessionFactory`] for a fresh one on every
//! attempt instead of caching it.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::ExchangeError;

/// Balance of a single asset on the exchange account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBalance {
    /// Asset symbol (e.g., "USDT").
    pub asset: String,
    /// Amount available for withdrawal.
    pub free: Decimal,
    /// Amount held by open orders or pending operations.
    pub locked: Decimal,
}

/// Account snapshot returned by [`ExchangeSession::account_info`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountInfo {
    pub balances: Vec<AssetBalance>,
}

impl AccountInfo {
    /// Free balance of `asset`, or `None` when the account lists no such asset.
    #[must_use]
    pub fn free_balance(&self, asset: &str) -> Option<Decimal> {
        self.balances
            .iter()
            .find(|balance| balance.asset.eq_ignore_ascii_case(asset))
            .map(|balance| balance.free)
    }
}

/// Represents a withdrawal to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawRequest {
    /// Asset to withdraw (e.g., "USDT").
    pub asset: String,
    /// Destination chain address.
    pub address: String,
    /// Amount in asset units.
    pub amount: Decimal,
    /// Settlement network (e.g., "BSC").
    pub network: String,
}

/// Acknowledgement of an accepted withdrawal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawReceipt {
    /// Withdrawal id assigned by the exchange.
    pub id: String,
}

/// Authenticated session against the exchange.
///
/// # Errors
///
/// Both operations return [`ExchangeError::TimeDesync`] when the exchange
/// rejects the request timestamp; every other variant is permanent from the
/// caller's point of view.
#[async_trait]
pub trait ExchangeSession: Send + Sync {
    /// Fetch the account's asset balances.
    async fn account_info(&self) -> Result<AccountInfo, ExchangeError>;

    /// Submit a withdrawal.
    async fn withdraw(&self, request: &WithdrawRequest) -> Result<WithdrawReceipt, ExchangeError>;

    /// Get the exchange name for logging/debugging.
    fn exchange_name(&self) -> &'static str;
}

/// Creates fresh [`ExchangeSession`]s bound to explicit credentials.
pub trait SessionFactory: Send + Sync {
    /// Build a new session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be constructed, for example
    /// when credentials are missing.
    fn create_session(&self) -> Result<Box<dyn ExchangeSession>, ExchangeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn free_balance_matches_asset_case_insensitively() {
        let info = AccountInfo {
            balances: vec![
                AssetBalance {
                    asset: "BNB".into(),
                    free: dec!(1),
                    locked: dec!(0),
                },
                AssetBalance {
                    asset: "USDT".into(),
                    free: dec!(42.5),
                    locked: dec!(3),
                },
            ],
        };

        assert_eq!(info.free_balance("usdt"), Some(dec!(42.5)));
        assert_eq!(info.free_balance("BTC"), None);
    }
}
