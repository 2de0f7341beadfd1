mod support;

use std::sync::Arc;
use std::time::Duration;

use rebate_payout::adapter::outbound::file::{CsvSummaryStore, JsonDirectorySource};
use rebate_payout::application::disburse::{DisbursementEngine, DisbursementSettings};
use rebate_payout::application::retry::RetryPolicy;
use rebate_payout::domain::{
    AddressDirectory, FailureReason, SkipReason, Tally, TransferStatus,
};
use rebate_payout::error::{DirectoryError, Error, ExchangeError};
use rebate_payout::port::outbound::store::{DirectorySource, SummaryStore};
use rebate_payout::testkit::domain::{account_info, header_row};
use rebate_payout::testkit::exchange::{desync, ScriptedExchange};
use rust_decimal_macros::dec;

use support::Workspace;

fn engine(exchange: &ScriptedExchange) -> DisbursementEngine {
    let settings = DisbursementSettings {
        pacing: Duration::ZERO,
        ..DisbursementSettings::default()
    };
    DisbursementEngine::new(Arc::new(exchange.clone()), settings, RetryPolicy::immediate(5))
}

fn directory(entries: &[(&str, &str)]) -> AddressDirectory {
    entries.iter().copied().collect()
}

#[tokio::test]
async fn pays_registered_account_and_skips_the_rest() {
    let ws = Workspace::new();
    let summary = ws.write_with_bom(
        "rebate_summary.csv",
        "account_id,category,rebate_amount,rebate_asset,usdt_value\n\
         1001,account summary,,,60.00000000\n\
         1001,spot,0.1,BNB,60.00000000\n\
         ,,,,\n\
         1002,account summary,,,30.00000000\n\
         1002,spot,0.05,BNB,30.00000000\n\
         ,,,,\n",
    );
    let addresses = ws.write("addresses.json", r#"{"1001": "0xabc"}"#);
    let exchange = ScriptedExchange::new().with_balance("USDT", dec!(500));

    let rows = CsvSummaryStore::new(&summary).load_rows().unwrap();
    let book = JsonDirectorySource::new(&addresses).load_directory().unwrap();
    let report = engine(&exchange).run(&rows, &book).await;

    assert_eq!(
        report.tally(),
        Tally {
            succeeded: 1,
            failed: 0,
            skipped: 1
        }
    );
    let withdrawals = exchange.withdrawals();
    assert_eq!(withdrawals.len(), 1);
    assert_eq!(withdrawals[0].amount, dec!(50));
    assert_eq!(withdrawals[0].address, "0xabc");
    assert_eq!(withdrawals[0].asset, "USDT");
    assert_eq!(withdrawals[0].network, "BSC");
    assert_eq!(
        report.outcomes[1].status,
        TransferStatus::Skipped(SkipReason::NoAddress)
    );
}

#[tokio::test]
async fn sub_unit_payout_is_skipped_without_exchange_calls() {
    let exchange = ScriptedExchange::new().with_balance("USDT", dec!(500));
    let rows = vec![header_row("7", "1.19999999")];

    let report = engine(&exchange)
        .run(&rows, &directory(&[("7", "0xseven")]))
        .await;

    assert!(matches!(
        report.outcomes[0].status,
        TransferStatus::Skipped(SkipReason::BelowMinimum { .. })
    ));
    assert_eq!(exchange.sessions_created(), 0);
}

#[tokio::test]
async fn insufficient_balance_never_withdraws() {
    let exchange = ScriptedExchange::new().with_balance("USDT", dec!(10));
    let rows = vec![header_row("1", "18")];

    let report = engine(&exchange)
        .run(&rows, &directory(&[("1", "0xone")]))
        .await;

    assert_eq!(
        report.outcomes[0].status,
        TransferStatus::Failed(FailureReason::InsufficientFunds {
            available: dec!(10),
            required: dec!(15),
        })
    );
    assert!(exchange.withdrawals().is_empty());
}

#[tokio::test]
async fn desync_on_withdraw_recovers_with_fresh_sessions() {
    let exchange = ScriptedExchange::new().with_balance("USDT", dec!(100));
    exchange.push_withdraw(Err(desync()));
    exchange.push_withdraw(Err(desync()));

    let report = engine(&exchange)
        .run(&[header_row("1", "36")], &directory(&[("1", "0xone")]))
        .await;

    assert!(report.outcomes[0].status.is_success());
    assert_eq!(exchange.withdrawals().len(), 3);
    // one session for the balance check, three for the withdrawal
    assert_eq!(exchange.sessions_created(), 4);
}

#[tokio::test]
async fn rejected_withdrawal_fails_after_one_call_and_run_continues() {
    let exchange = ScriptedExchange::new().with_balance("USDT", dec!(100));
    exchange.push_withdraw(Err(ExchangeError::Api {
        code: -4026,
        message: "address not whitelisted".into(),
    }));
    let rows = vec![header_row("1", "36"), header_row("2", "36")];

    let report = engine(&exchange)
        .run(&rows, &directory(&[("1", "0xone"), ("2", "0xtwo")]))
        .await;

    assert!(report.outcomes[0].status.is_failed());
    assert!(report.outcomes[1].status.is_success());
    assert_eq!(exchange.withdrawals().len(), 2);
}

#[tokio::test]
async fn balance_is_fetched_per_account() {
    let exchange = ScriptedExchange::new();
    exchange.push_account(Ok(account_info("USDT", dec!(40))));
    exchange.push_account(Ok(account_info("USDT", dec!(5))));
    let rows = vec![header_row("1", "36"), header_row("2", "36")];

    let report = engine(&exchange)
        .run(&rows, &directory(&[("1", "0xone"), ("2", "0xtwo")]))
        .await;

    assert!(report.outcomes[0].status.is_success());
    assert!(matches!(
        report.outcomes[1].status,
        TransferStatus::Failed(FailureReason::InsufficientFunds { .. })
    ));
    assert_eq!(exchange.account_calls(), 2);
}

#[test]
fn empty_directory_aborts_before_any_transfer() {
    let ws = Workspace::new();
    let addresses = ws.write("addresses.json", "{}");

    let result = JsonDirectorySource::new(&addresses).load_directory();

    assert!(matches!(result, Err(Error::Directory(DirectoryError::Empty))));
}

#[test]
fn missing_directory_is_reported_with_its_path() {
    let ws = Workspace::new();

    let err = JsonDirectorySource::new(ws.file("addresses.json"))
        .load_directory()
        .unwrap_err();

    assert!(matches!(err, Error::Directory(DirectoryError::NotFound { .. })));
    assert!(err.to_string().contains("addresses.json"));
}
