//! File-backed stores for the batch artifacts.
//!
//! - [`records`] - Rebate record CSV (exchange affiliate export)
//! - [`summary`] - Summary CSV shared by both jobs (UTF-8 with BOM)
//! - [`directory`] - JSON payout address directory

pub mod directory;
pub mod records;
pub mod summary;

pub use directory::JsonDirectorySource;
pub use records::CsvRecordSource;
pub use summary::CsvSummaryStore;

use std::path::Path;

use crate::error::InputError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A required CSV column and the header spellings accepted for it.
pub(crate) struct Column {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl Column {
    fn matches(&self, header: &str) -> bool {
        let header = header.trim();
        header == self.name || self.aliases.contains(&header)
    }
}

/// Map each required column to its index in `headers`.
pub(crate) fn resolve_columns<const N: usize>(
    headers: &csv::StringRecord,
    columns: &[Column; N],
) -> Result<[usize; N], InputError> {
    let mut indexes = [0usize; N];
    for (slot, column) in indexes.iter_mut().zip(columns) {
        *slot = headers
            .iter()
            .position(|header| column.matches(header))
            .ok_or(InputError::MissingColumn {
                column: column.name,
            })?;
    }
    Ok(indexes)
}

/// Read a file, dropping a leading UTF-8 byte-order mark.
pub(crate) fn read_without_bom(path: &Path) -> Result<Vec<u8>, InputError> {
    let mut bytes = std::fs::read(path).map_err(|source| InputError::Read {
        path: path.display().to_string(),
        source,
    })?;
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    Ok(bytes)
}
