//! Handler for the `aggregate` command.

use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::command::AggregateArgs;
use super::output;
use crate::adapter::outbound::file::{CsvRecordSource, CsvSummaryStore};
use crate::application::aggregate::RebateAggregator;
use crate::domain::money::format_amount;
use crate::domain::{AccountSummary, Category};
use crate::error::Result;
use crate::port::outbound::store::{RecordSource, SummaryStore};

#[derive(Tabled)]
struct SummaryLine {
    #[tabled(rename = "Account")]
    account_id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "USDT")]
    usdt_value: String,
}

/// Execute `aggregate`.
pub fn execute(args: &AggregateArgs) -> Result<()> {
    let records = CsvRecordSource::new(&args.input).load_records()?;
    let aggregator = RebateAggregator::new();
    let summaries = aggregator.aggregate(&records)?;
    let rows = aggregator.render(&summaries);
    CsvSummaryStore::new(&args.output).save_rows(&rows)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "aggregate",
            "input": args.input.display().to_string(),
            "output": args.output.display().to_string(),
            "records": records.len(),
            "accounts": summaries.len(),
            "summaries": summaries.iter().map(summary_json).collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Rebate Summary");
    if summaries.is_empty() {
        output::warning("No account has a non-zero rebate value");
    } else if !output::is_quiet() {
        let mut table = Table::new(summaries.iter().flat_map(table_lines));
        table.with(Style::rounded());
        output::lines(&table.to_string());
    }

    output::section("Result");
    output::field("Records", records.len());
    output::field("Accounts", summaries.len());
    output::field("Output", args.output.display());
    output::success("Summary written");
    Ok(())
}

fn table_lines(summary: &AccountSummary) -> Vec<SummaryLine> {
    let mut lines = Vec::with_capacity(summary.lines.len() + 1);
    lines.push(SummaryLine {
        account_id: summary.account_id.to_string(),
        category: Category::AccountSummary.label().to_string(),
        amount: String::new(),
        asset: String::new(),
        usdt_value: format_amount(summary.total_usdt_value),
    });
    for line in &summary.lines {
        lines.push(SummaryLine {
            account_id: String::new(),
            category: line.category.to_string(),
            amount: format_amount(line.amount),
            asset: line.asset.clone(),
            usdt_value: format_amount(line.usdt_value),
        });
    }
    lines
}

fn summary_json(summary: &AccountSummary) -> serde_json::Value {
    json!({
        "account_id": summary.account_id.as_str(),
        "usdt_value": format_amount(summary.total_usdt_value),
        "lines": summary.lines.iter().map(|line| json!({
            "category": line.category.to_string(),
            "asset": line.asset,
            "amount": format_amount(line.amount),
            "usdt_value": format_amount(line.usdt_value),
        })).collect::<Vec<_>>(),
    })
}
