//! Summary CSV store.
//!
//! Files are UTF-8 with a byte-order mark. Each account group ends with a row
//! of empty fields; the reader hands those back as separator rows and leaves
//! it to the caller to skip them.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{read_without_bom, resolve_columns, Column, UTF8_BOM};
use crate::domain::SummaryRow;
use crate::error::{InputError, Result};
use crate::port::outbound::store::SummaryStore;

const COLUMNS: [Column; 5] = [
    Column {
        name: "account_id",
        aliases: &["现货UID"],
    },
    Column {
        name: "category",
        aliases: &["交易类型"],
    },
    Column {
        name: "rebate_amount",
        aliases: &["返佣数量"],
    },
    Column {
        name: "rebate_asset",
        aliases: &["返佣币种"],
    },
    Column {
        name: "usdt_value",
        aliases: &["USDT价值"],
    },
];

/// Summary artifact stored as a CSV file.
#[derive(Debug, Clone)]
pub struct CsvSummaryStore {
    path: PathBuf,
}

impl CsvSummaryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "summary".into(), |n| n.to_string_lossy().into_owned());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

impl SummaryStore for CsvSummaryStore {
    fn save_rows(&self, rows: &[SummaryRow]) -> Result<()> {
        let staging = self.staging_path();
        let file = fs::File::create(&staging)?;
        if let Err(err) = write_rows(file, rows) {
            let _ = fs::remove_file(&staging);
            return Err(err);
        }
        fs::rename(&staging, &self.path)?;

        info!(path = %self.path.display(), rows = rows.len(), "Wrote summary");
        Ok(())
    }

    fn load_rows(&self) -> Result<Vec<SummaryRow>> {
        let bytes = read_without_bom(&self.path)?;
        let rows = parse_rows(&bytes)?;
        info!(path = %self.path.display(), rows = rows.len(), "Loaded summary");
        Ok(rows)
    }
}

/// Write the BOM, the header and every row.
///
/// # Errors
///
/// Returns an error if the underlying writer fails.
pub fn write_rows<W: Write>(mut writer: W, rows: &[SummaryRow]) -> Result<()> {
    writer.write_all(UTF8_BOM)?;

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(COLUMNS.iter().map(|column| column.name))?;
    for row in rows {
        csv.write_record(row.fields())?;
    }
    csv.flush()?;
    Ok(())
}

/// Parse summary CSV content (without BOM).
///
/// Short rows are padded with empty fields.
///
/// # Errors
///
/// Returns [`InputError::MissingColumn`] if a required header is absent.
pub fn parse_rows(content: &[u8]) -> std::result::Result<Vec<SummaryRow>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content);
    let [account_col, category_col, amount_col, asset_col, value_col] =
        resolve_columns(reader.headers()?, &COLUMNS)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let field = |col: usize| record.get(col).unwrap_or("").trim().to_string();
        rows.push(SummaryRow {
            account_id: field(account_col),
            category: field(category_col),
            rebate_amount: field(amount_col),
            rebate_asset: field(asset_col),
            usdt_value: field(value_col),
        });
    }
    Ok(rows)
}
