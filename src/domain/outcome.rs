//! Terminal outcomes of a disbursement run.

use std::fmt;

use rust_decimal::Decimal;

use super::AccountId;

/// Why an account was excluded from the run. Exclusions are not failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No payout address registered for the account.
    NoAddress,
    /// Computed payout is under the configured minimum.
    BelowMinimum { amount: Decimal, minimum: Decimal },
    /// Header row carried a USDT value that is not a decimal, or one too
    /// large to compute a payout from.
    InvalidValue { raw: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAddress => write!(f, "no payout address"),
            Self::BelowMinimum { amount, minimum } => {
                write!(f, "payout {amount} below minimum {minimum}")
            }
            Self::InvalidValue { raw } => write!(f, "invalid USDT value '{raw}'"),
        }
    }
}

/// Why an eligible account could not be paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Balance could not be fetched or decoded.
    BalanceUnavailable(String),
    /// The account info carried no entry for the settlement asset.
    MissingSettlementAsset { asset: String },
    InsufficientFunds { available: Decimal, required: Decimal },
    /// The withdrawal call itself was rejected or errored.
    Withdrawal(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BalanceUnavailable(reason) => write!(f, "balance unavailable: {reason}"),
            Self::MissingSettlementAsset { asset } => write!(f, "no {asset} balance on account"),
            Self::InsufficientFunds {
                available,
                required,
            } => write!(f, "insufficient funds: available {available}, required {required}"),
            Self::Withdrawal(reason) => write!(f, "withdrawal failed: {reason}"),
        }
    }
}

/// Terminal state of one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferStatus {
    Succeeded {
        amount: Decimal,
        destination: String,
        receipt_id: String,
    },
    Failed(FailureReason),
    Skipped(SkipReason),
}

impl TransferStatus {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// Terminal state attributed to an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountOutcome {
    pub account_id: AccountId,
    pub status: TransferStatus,
}

/// Final counts for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Tally {
    /// Count one terminal status.
    pub fn record(&mut self, status: &TransferStatus) {
        match status {
            TransferStatus::Succeeded { .. } => self.succeeded += 1,
            TransferStatus::Failed(_) => self.failed += 1,
            TransferStatus::Skipped(_) => self.skipped += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }
}

impl<'a> FromIterator<&'a AccountOutcome> for Tally {
    fn from_iter<I: IntoIterator<Item = &'a AccountOutcome>>(iter: I) -> Self {
        let mut tally = Self::default();
        for outcome in iter {
            tally.record(&outcome.status);
        }
        tally
    }
}
