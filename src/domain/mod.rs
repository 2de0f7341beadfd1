//! Exchange-agnostic domain logic.

mod directory;
mod id;
mod outcome;
mod payout;
mod product;
mod record;
mod summary;

pub mod money;

// Core domain types
pub use directory::AddressDirectory;
pub use id::AccountId;
pub use product::{Category, ProductType};
pub use record::RebateRecord;
pub use summary::{AccountSummary, CategoryLine, SummaryRow};

// Disbursement
pub use outcome::{AccountOutcome, FailureReason, SkipReason, Tally, TransferStatus};
pub use payout::{DisbursementIntent, PayoutPolicy};
