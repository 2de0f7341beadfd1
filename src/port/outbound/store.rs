//! Persistence ports for the batch artifacts.

use crate::domain::{AddressDirectory, RebateRecord, SummaryRow};
use crate::error::Result;

/// Source of raw rebate records.
pub trait RecordSource {
    /// Load every record; any malformed row fails the whole load.
    fn load_records(&self) -> Result<Vec<RebateRecord>>;
}

/// Storage for the summary artifact shared by both batch jobs.
pub trait SummaryStore {
    /// Replace the artifact with `rows`. Either all rows land or none do.
    fn save_rows(&self, rows: &[SummaryRow]) -> Result<()>;

    /// Load every row, separators included.
    fn load_rows(&self) -> Result<Vec<SummaryRow>>;
}

/// Source of the payout address directory.
pub trait DirectorySource {
    /// Load the directory. Missing, malformed or empty documents are errors.
    fn load_directory(&self) -> Result<AddressDirectory>;
}
