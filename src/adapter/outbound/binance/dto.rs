//! Binance REST payloads.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::port::outbound::exchange::{AccountInfo, AssetBalance, WithdrawReceipt};

/// `GET /api/v3/account` response (fields we use).
#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    pub balances: Vec<BalanceEntry>,
}

#[derive(Debug, Deserialize)]
pub struct BalanceEntry {
    pub asset: String,
    pub free: Decimal,
    pub locked: Decimal,
}

/// `POST /sapi/v1/capital/withdraw/apply` response.
#[derive(Debug, Deserialize)]
pub struct WithdrawResponse {
    pub id: String,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}

impl From<AccountResponse> for AccountInfo {
    fn from(response: AccountResponse) -> Self {
        Self {
            balances: response
                .balances
                .into_iter()
                .map(|entry| AssetBalance {
                    asset: entry.asset,
                    free: entry.free,
                    locked: entry.locked,
                })
                .collect(),
        }
    }
}

impl From<WithdrawResponse> for WithdrawReceipt {
    fn from(response: WithdrawResponse) -> Self {
        Self { id: response.id }
    }
}
