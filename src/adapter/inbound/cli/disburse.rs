//! Handler for the `disburse` command.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use rust_decimal::Decimal;
use serde_json::json;

use super::command::DisburseArgs;
use super::output;
use crate::adapter::outbound::file::{CsvSummaryStore, JsonDirectorySource};
use crate::application::disburse::{Candidate, DisbursementReport};
use crate::domain::money::format_amount;
use crate::domain::{AccountOutcome, Tally, TransferStatus};
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::exchange::factory::ExchangeFactory;
use crate::port::outbound::store::{DirectorySource, SummaryStore};

/// Execute `disburse`.
pub async fn execute(args: &DisburseArgs, config: &Config) -> Result<()> {
    let directory = JsonDirectorySource::new(&args.addresses).load_directory()?;
    let rows = CsvSummaryStore::new(&args.summary).load_rows()?;

    let engine = ExchangeFactory::create_engine(config);
    let settings = engine.settings();
    let candidates = engine.plan(&rows, &directory);
    let eligible: Vec<_> = candidates
        .iter()
        .filter_map(|candidate| match candidate {
            Candidate::Eligible(intent) => Some(intent),
            Candidate::Skipped { .. } => None,
        })
        .collect();
    let planned_total: Decimal = eligible.iter().map(|intent| intent.payout_amount).sum();

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Payout Plan");
    output::field("Summary", args.summary.display());
    output::field("Directory", format!("{} addresses", directory.len()));
    output::field("Asset", &settings.asset);
    output::field("Network", &settings.network);
    output::field("Eligible", eligible.len());
    output::field("Total", format!("{} {}", format_amount(planned_total), settings.asset));

    if args.dry_run {
        for candidate in &candidates {
            print_candidate(candidate, &settings.asset);
        }
        if output::is_json() {
            output::json_output(json!({
                "command": "disburse",
                "dry_run": true,
                "plan": candidates.iter().map(candidate_json).collect::<Vec<_>>(),
            }));
        }
        output::note("Dry run: no withdrawals submitted");
        return Ok(());
    }

    if !eligible.is_empty() && !args.yes {
        if output::is_json() {
            return Err(Error::ConfirmationRequired);
        }
        let proceed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Withdraw {} {} to {} accounts?",
                format_amount(planned_total),
                settings.asset,
                eligible.len()
            ))
            .default(false)
            .interact()?;
        if !proceed {
            output::warning("Disbursement cancelled by user");
            return Ok(());
        }
    }

    let pb = output::spinner("Submitting withdrawals");
    let report = engine.execute(candidates).await;
    let tally = report.tally();
    output::spinner_success(&pb, "Submitting withdrawals");

    print_report(&report, tally);
    Ok(())
}

fn print_candidate(candidate: &Candidate, asset: &str) {
    match candidate {
        Candidate::Eligible(intent) => output::outcome(
            intent.account_id.as_str(),
            "eligible",
            &format!(
                "{} {asset} to {}",
                format_amount(intent.payout_amount),
                intent.destination
            ),
        ),
        Candidate::Skipped { account_id, reason } => {
            output::outcome(account_id.as_str(), "skipped", &reason.to_string());
        }
    }
}

fn candidate_json(candidate: &Candidate) -> serde_json::Value {
    match candidate {
        Candidate::Eligible(intent) => json!({
            "account_id": intent.account_id.as_str(),
            "status": "eligible",
            "usdt_value": format_amount(intent.usdt_value),
            "payout_amount": format_amount(intent.payout_amount),
            "destination": intent.destination,
        }),
        Candidate::Skipped { account_id, reason } => json!({
            "account_id": account_id.as_str(),
            "status": "skipped",
            "reason": reason.to_string(),
        }),
    }
}

fn status_label(status: &TransferStatus) -> (&'static str, String) {
    match status {
        TransferStatus::Succeeded {
            amount,
            destination,
            receipt_id,
        } => (
            "succeeded",
            format!("{} to {destination} (id {receipt_id})", format_amount(*amount)),
        ),
        TransferStatus::Failed(reason) => ("failed", reason.to_string()),
        TransferStatus::Skipped(reason) => ("skipped", reason.to_string()),
    }
}

fn outcome_json(outcome: &AccountOutcome) -> serde_json::Value {
    let (status, detail) = status_label(&outcome.status);
    json!({
        "account_id": outcome.account_id.as_str(),
        "status": status,
        "detail": detail,
    })
}

fn print_report(report: &DisbursementReport, tally: Tally) {
    if output::is_json() {
        output::json_output(json!({
            "command": "disburse",
            "dry_run": false,
            "outcomes": report.outcomes.iter().map(outcome_json).collect::<Vec<_>>(),
            "tally": {
                "succeeded": tally.succeeded,
                "failed": tally.failed,
                "skipped": tally.skipped,
            },
        }));
        return;
    }

    output::section("Outcomes");
    for outcome in &report.outcomes {
        let (status, detail) = status_label(&outcome.status);
        output::outcome(outcome.account_id.as_str(), status, &detail);
    }

    output::section("Tally");
    output::field("Succeeded", output::positive(tally.succeeded));
    output::field("Failed", output::negative(tally.failed));
    output::field("Skipped", tally.skipped);
    if tally.failed > 0 {
        output::hint("failed accounts were not paid; see the outcomes above");
    } else {
        output::success("Disbursement complete");
    }
}
