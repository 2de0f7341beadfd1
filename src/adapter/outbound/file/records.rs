//! Rebate record CSV reader.

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::info;

use super::{read_without_bom, resolve_columns, Column};
use crate::domain::{AccountId, ProductType, RebateRecord};
use crate::error::{InputError, Result};
use crate::port::outbound::store::RecordSource;

const COLUMNS: [Column; 5] = [
    Column {
        name: "account_id",
        aliases: &["好友ID（现货）", "好友ID(现货)"],
    },
    Column {
        name: "product_type",
        aliases: &["订单类型"],
    },
    Column {
        name: "rebate_asset",
        aliases: &["返佣资产"],
    },
    Column {
        name: "rebate_amount",
        aliases: &["返佣收入"],
    },
    Column {
        name: "rebate_value_usdt",
        aliases: &["返佣收入(USDT)", "返佣收入（USDT）"],
    },
];

/// Reads rebate records from a CSV file.
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    path: PathBuf,
}

impl CsvRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for CsvRecordSource {
    fn load_records(&self) -> Result<Vec<RebateRecord>> {
        let bytes = read_without_bom(&self.path)?;
        let records = parse_records(&bytes)?;
        info!(
            path = %self.path.display(),
            records = records.len(),
            "Loaded rebate records"
        );
        Ok(records)
    }
}

/// Parse CSV content into records, rejecting the whole input on any bad row.
///
/// # Errors
///
/// Returns [`InputError`] for missing columns, ragged rows, blank fields,
/// non-numeric or negative amounts and unknown product types.
pub fn parse_records(content: &[u8]) -> std::result::Result<Vec<RebateRecord>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content);
    let [account_col, product_col, asset_col, amount_col, value_col] =
        resolve_columns(reader.headers()?, &COLUMNS)?;

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let row = result?;
        let line = row
            .position()
            .map_or(index + 2, |position| position.line() as usize);
        let field = |col: usize| row.get(col).unwrap_or("").trim();

        let account_raw = require(line, "account_id", field(account_col))?;
        let account_id = AccountId::parse_numeric(account_raw)
            .unwrap_or_else(|| AccountId::new(account_raw));

        let product_raw = field(product_col);
        let product_type =
            ProductType::parse(product_raw).ok_or_else(|| InputError::UnknownProductType {
                row: line,
                value: product_raw.to_string(),
            })?;

        let rebate_asset = require(line, "rebate_asset", field(asset_col))?.to_string();
        let rebate_amount = parse_amount(line, "rebate_amount", field(amount_col))?;
        let rebate_value_usdt = parse_amount(line, "rebate_value_usdt", field(value_col))?;

        records.push(RebateRecord {
            account_id,
            product_type,
            rebate_asset,
            rebate_amount,
            rebate_value_usdt,
        });
    }

    Ok(records)
}

fn require<'a>(
    row: usize,
    column: &'static str,
    value: &'a str,
) -> std::result::Result<&'a str, InputError> {
    if value.is_empty() {
        return Err(InputError::InvalidField {
            row,
            column,
            value: String::new(),
            reason: "value is required".into(),
        });
    }
    Ok(value)
}

fn parse_amount(
    row: usize,
    column: &'static str,
    raw: &str,
) -> std::result::Result<Decimal, InputError> {
    let invalid = |reason: String| InputError::InvalidField {
        row,
        column,
        value: raw.to_string(),
        reason,
    };

    let raw = require(row, column, raw)?;
    let value = Decimal::from_str(raw)
        .or_else(|err| {
            if raw.contains(|c| c == 'e' || c == 'E') {
                Decimal::from_scientific(raw)
            } else {
                Err(err)
            }
        })
        .map_err(|err| invalid(err.to_string()))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(invalid("must not be negative".into()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_canonical_headers() {
        let csv = "account_id,product_type,rebate_asset,rebate_amount,rebate_value_usdt\n\
                   1001,spot,BNB,0.01,6.2\n\
                   1001,usdt-margined-futures,USDT,1.5,1.5\n";

        let records = parse_records(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].account_id, AccountId::from("1001"));
        assert_eq!(records[0].product_type, ProductType::Spot);
        assert_eq!(records[0].rebate_amount, dec!(0.01));
        assert_eq!(records[1].product_type, ProductType::UsdtMarginedFutures);
    }

    #[test]
    fn parses_exchange_export_headers_in_any_order() {
        let csv = "订单类型,好友ID（现货）,返佣资产,返佣收入(USDT),返佣收入,备注\n\
                   Coin-futures,123.0,ETH,7.1,0.002,x\n\
                   USDT-futures,123,USDT,1e-2,1e-2,y\n";

        let records = parse_records(csv.as_bytes()).unwrap();

        assert_eq!(records[0].account_id, AccountId::from("123"));
        assert_eq!(records[0].product_type, ProductType::CoinMarginedFutures);
        assert_eq!(records[0].rebate_amount, dec!(0.002));
        assert_eq!(records[0].rebate_value_usdt, dec!(7.1));
        assert_eq!(records[1].rebate_value_usdt, dec!(0.01));
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let csv = "account_id,product_type,rebate_asset,rebate_amount\n1,spot,BNB,1\n";

        let err = parse_records(csv.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            InputError::MissingColumn {
                column: "rebate_value_usdt"
            }
        ));
    }

    #[test]
    fn non_numeric_amount_is_rejected_not_zeroed() {
        let csv = "account_id,product_type,rebate_asset,rebate_amount,rebate_value_usdt\n\
                   1,spot,BNB,0.1,1\n\
                   2,spot,BNB,abc,1\n";

        let err = parse_records(csv.as_bytes()).unwrap_err();

        match err {
            InputError::InvalidField {
                row, column, value, ..
            } => {
                assert_eq!(row, 3);
                assert_eq!(column, "rebate_amount");
                assert_eq!(value, "abc");
            }
            other => panic!("expected invalid field, got {other}"),
        }
    }

    #[test]
    fn negative_and_blank_amounts_are_rejected() {
        let negative = "account_id,product_type,rebate_asset,rebate_amount,rebate_value_usdt\n\
                        1,spot,BNB,0.1,-1\n";
        let blank = "account_id,product_type,rebate_asset,rebate_amount,rebate_value_usdt\n\
                     1,spot,BNB,,1\n";

        assert!(matches!(
            parse_records(negative.as_bytes()),
            Err(InputError::InvalidField {
                column: "rebate_value_usdt",
                ..
            })
        ));
        assert!(matches!(
            parse_records(blank.as_bytes()),
            Err(InputError::InvalidField {
                column: "rebate_amount",
                ..
            })
        ));
    }

    #[test]
    fn unknown_product_type_is_fatal() {
        let csv = "account_id,product_type,rebate_asset,rebate_amount,rebate_value_usdt\n\
                   1,options,BTC,0.1,1\n";

        assert!(matches!(
            parse_records(csv.as_bytes()),
            Err(InputError::UnknownProductType { row: 2, .. })
        ));
    }
}
