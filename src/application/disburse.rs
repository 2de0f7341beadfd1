//! Disbursement service.
//!
//! Turns summary header rows into payout intents and executes them one
//! account at a time: fresh balance check, then withdrawal. Per-account
//! errors are recorded as outcomes and never abort the batch.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::retry::{call_with_fresh_session, RetryPolicy};
use crate::domain::{
    AccountId, AccountOutcome, AddressDirectory, DisbursementIntent, FailureReason, PayoutPolicy,
    SkipReason, SummaryRow, Tally, TransferStatus,
};
use crate::error::ExchangeError;
use crate::port::outbound::exchange::{SessionFactory, WithdrawRequest};

/// Settlement parameters for a disbursement run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisbursementSettings {
    /// Asset paid out and checked for balance.
    pub asset: String,
    /// Network the withdrawal settles on.
    pub network: String,
    pub policy: PayoutPolicy,
    /// Pause after each successful withdrawal.
    pub pacing: Duration,
}

impl Default for DisbursementSettings {
    fn default() -> Self {
        Self {
            asset: "USDT".into(),
            network: "BSC".into(),
            policy: PayoutPolicy::default(),
            pacing: Duration::from_secs(1),
        }
    }
}

/// A summary header resolved against the directory and payout policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    Eligible(DisbursementIntent),
    Skipped {
        account_id: AccountId,
        reason: SkipReason,
    },
}

impl Candidate {
    #[must_use]
    pub fn account_id(&self) -> &AccountId {
        match self {
            Self::Eligible(intent) => &intent.account_id,
            Self::Skipped { account_id, .. } => account_id,
        }
    }
}

/// Outcomes of a run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisbursementReport {
    pub outcomes: Vec<AccountOutcome>,
}

impl DisbursementReport {
    #[must_use]
    pub fn tally(&self) -> Tally {
        self.outcomes.iter().collect()
    }
}

/// Resolve summary rows into candidates.
///
/// Rows without a numeric account id, and rows that are not account headers,
/// are dropped without being counted.
#[must_use]
pub fn plan(
    rows: &[SummaryRow],
    directory: &AddressDirectory,
    policy: &PayoutPolicy,
) -> Vec<Candidate> {
    rows.iter()
        .filter_map(|row| classify(row, directory, policy))
        .collect()
}

fn classify(
    row: &SummaryRow,
    directory: &AddressDirectory,
    policy: &PayoutPolicy,
) -> Option<Candidate> {
    let Some(account_id) = AccountId::parse_numeric(&row.account_id) else {
        if !row.is_separator() {
            debug!(raw = %row.account_id, "Ignoring row without a numeric account id");
        }
        return None;
    };
    if !row.is_account_summary() {
        return None;
    }

    debug!(account_id = %account_id, "Planning account");

    let Some(destination) = directory.lookup(&account_id) else {
        info!(account_id = %account_id, "Skipping account: no payout address");
        return Some(Candidate::Skipped {
            account_id,
            reason: SkipReason::NoAddress,
        });
    };

    let usdt_value = match Decimal::from_str(row.usdt_value.trim()) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                account_id = %account_id,
                raw = %row.usdt_value,
                error = %err,
                "Skipping account: unreadable USDT value"
            );
            return Some(Candidate::Skipped {
                account_id,
                reason: SkipReason::InvalidValue {
                    raw: row.usdt_value.clone(),
                },
            });
        }
    };

    let Some(payout_amount) = policy.payout_for(usdt_value) else {
        warn!(
            account_id = %account_id,
            value = %usdt_value,
            "Skipping account: USDT value out of range for payout"
        );
        return Some(Candidate::Skipped {
            account_id,
            reason: SkipReason::InvalidValue {
                raw: row.usdt_value.clone(),
            },
        });
    };
    if !policy.meets_minimum(payout_amount) {
        info!(
            account_id = %account_id,
            amount = %payout_amount,
            minimum = %policy.minimum(),
            "Skipping account: payout below minimum"
        );
        return Some(Candidate::Skipped {
            account_id,
            reason: SkipReason::BelowMinimum {
                amount: payout_amount,
                minimum: policy.minimum(),
            },
        });
    }

    Some(Candidate::Eligible(DisbursementIntent {
        account_id,
        usdt_value,
        payout_amount,
        destination: destination.to_string(),
    }))
}

/// Sequential executor of payout intents.
pub struct DisbursementEngine {
    factory: Arc<dyn SessionFactory>,
    settings: DisbursementSettings,
    retry: RetryPolicy,
}

impl DisbursementEngine {
    pub fn new(
        factory: Arc<dyn SessionFactory>,
        settings: DisbursementSettings,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            factory,
            settings,
            retry,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &DisbursementSettings {
        &self.settings
    }

    /// Resolve rows into candidates using this engine's payout policy.
    #[must_use]
    pub fn plan(&self, rows: &[SummaryRow], directory: &AddressDirectory) -> Vec<Candidate> {
        plan(rows, directory, &self.settings.policy)
    }

    /// Plan and execute in one pass.
    pub async fn run(&self, rows: &[SummaryRow], directory: &AddressDirectory) -> DisbursementReport {
        let candidates = self.plan(rows, directory);
        self.execute(candidates).await
    }

    /// Execute candidates in order, one account fully resolved at a time.
    pub async fn execute(&self, candidates: Vec<Candidate>) -> DisbursementReport {
        let mut outcomes = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let outcome = match candidate {
                Candidate::Skipped { account_id, reason } => AccountOutcome {
                    account_id,
                    status: TransferStatus::Skipped(reason),
                },
                Candidate::Eligible(intent) => {
                    let status = self.disburse(&intent).await;
                    AccountOutcome {
                        account_id: intent.account_id,
                        status,
                    }
                }
            };
            outcomes.push(outcome);
        }

        let report = DisbursementReport { outcomes };
        let tally = report.tally();
        info!(
            succeeded = tally.succeeded,
            failed = tally.failed,
            skipped = tally.skipped,
            "Disbursement run complete"
        );
        report
    }

    /// Free balance of the settlement asset, fetched through a fresh session.
    ///
    /// Returns `Ok(None)` when the account lists no such asset.
    ///
    /// # Errors
    ///
    /// Returns the exchange error left after retries.
    pub async fn fetch_balance(&self) -> Result<Option<Decimal>, ExchangeError> {
        let info = call_with_fresh_session(
            self.factory.as_ref(),
            &self.retry,
            "account_info",
            |session| async move { session.account_info().await },
        )
        .await?;
        Ok(info.free_balance(&self.settings.asset))
    }

    async fn disburse(&self, intent: &DisbursementIntent) -> TransferStatus {
        let account_id = &intent.account_id;
        let asset = &self.settings.asset;
        info!(
            account_id = %account_id,
            amount = %intent.payout_amount,
            destination = %intent.destination,
            "Preparing transfer"
        );

        let available = match self.fetch_balance().await {
            Ok(Some(available)) => available,
            Ok(None) => {
                error!(account_id = %account_id, asset = %asset, "Account holds no settlement asset");
                return TransferStatus::Failed(FailureReason::MissingSettlementAsset {
                    asset: asset.clone(),
                });
            }
            Err(err) => {
                error!(account_id = %account_id, error = %err, "Failed to fetch balance");
                return TransferStatus::Failed(FailureReason::BalanceUnavailable(err.to_string()));
            }
        };

        if available < intent.payout_amount {
            error!(
                account_id = %account_id,
                available = %available,
                required = %intent.payout_amount,
                "Insufficient balance for transfer"
            );
            return TransferStatus::Failed(FailureReason::InsufficientFunds {
                available,
                required: intent.payout_amount,
            });
        }

        let request = WithdrawRequest {
            asset: asset.clone(),
            address: intent.destination.clone(),
            amount: intent.payout_amount,
            network: self.settings.network.clone(),
        };
        let request = &request;
        let result = call_with_fresh_session(
            self.factory.as_ref(),
            &self.retry,
            "withdraw",
            |session| async move { session.withdraw(request).await },
        )
        .await;

        match result {
            Ok(receipt) => {
                info!(
                    account_id = %account_id,
                    amount = %intent.payout_amount,
                    destination = %intent.destination,
                    withdraw_id = %receipt.id,
                    "Transfer submitted"
                );
                if !self.settings.pacing.is_zero() {
                    sleep(self.settings.pacing).await;
                }
                TransferStatus::Succeeded {
                    amount: intent.payout_amount,
                    destination: intent.destination.clone(),
                    receipt_id: receipt.id,
                }
            }
            Err(err) => {
                error!(account_id = %account_id, error = %err, "Withdrawal failed");
                TransferStatus::Failed(FailureReason::Withdrawal(err.to_string()))
            }
        }
    }
}
