mod support;

use assert_cmd::Command;
use predicates::prelude::*;

use support::{Workspace, EXPORT_CSV};

/// Command isolated from the developer's home config and credentials.
fn rebate_payout(ws: &Workspace) -> Command {
    let mut cmd = Command::cargo_bin("rebate-payout").expect("binary built");
    cmd.current_dir(ws.path())
        .env("HOME", ws.path())
        .env_remove("BINANCE_API_KEY")
        .env_remove("BINANCE_API_SECRET")
        .env_remove("RUST_LOG")
        .arg("--color")
        .arg("never");
    cmd
}

#[test]
fn aggregate_writes_summary_next_to_working_directory() {
    let ws = Workspace::new();
    ws.write("export.csv", EXPORT_CSV);

    rebate_payout(&ws)
        .args(["aggregate", "--input", "export.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary written"));

    let summary = ws.read("rebate_summary.csv");
    assert!(summary.contains("1001,account summary,,,60.00000000"));
    assert!(!summary.contains("1003"));
}

#[test]
fn aggregate_json_reports_account_count() {
    let ws = Workspace::new();
    ws.write("export.csv", EXPORT_CSV);

    let assert = rebate_payout(&ws)
        .args(["--json", "aggregate", "-i", "export.csv", "-o", "out.csv"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).expect("json output");
    assert_eq!(value["command"], "aggregate");
    assert_eq!(value["accounts"], 2);
    assert_eq!(value["summaries"][0]["usdt_value"], "60.00000000");
}

#[test]
fn aggregate_fails_on_bad_input() {
    let ws = Workspace::new();
    ws.write(
        "export.csv",
        "account_id,product_type,rebate_asset,rebate_amount,rebate_value_usdt\n1,options,BTC,1,1\n",
    );

    rebate_payout(&ws)
        .args(["aggregate", "--input", "export.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown product type 'options'"));

    assert!(!ws.file("rebate_summary.csv").exists());
}

#[test]
fn aggregate_fails_when_account_total_overflows() {
    let ws = Workspace::new();
    ws.write(
        "export.csv",
        "account_id,product_type,rebate_asset,rebate_amount,rebate_value_usdt\n\
         1,spot,BNB,1,79228162514264337593543950335\n\
         1,spot,BNB,1,79228162514264337593543950335\n",
    );

    rebate_payout(&ws)
        .args(["aggregate", "--input", "export.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the representable range"));

    assert!(!ws.file("rebate_summary.csv").exists());
}

#[test]
fn disburse_dry_run_makes_no_exchange_calls() {
    let ws = Workspace::new();
    ws.write("export.csv", EXPORT_CSV);
    ws.write("addresses.json", r#"{"1001": "0xabc"}"#);

    rebate_payout(&ws)
        .args(["aggregate", "--input", "export.csv"])
        .assert()
        .success();

    // no credentials are set, so any exchange call would fail the run
    rebate_payout(&ws)
        .args(["disburse", "--addresses", "addresses.json", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50.00000000 USDT to 0xabc"))
        .stdout(predicate::str::contains("no payout address"))
        .stderr(predicate::str::contains("Processing account").not())
        .stderr(predicate::str::contains("Preparing transfer").not());
}

#[test]
fn disburse_without_directory_aborts() {
    let ws = Workspace::new();
    ws.write("rebate_summary.csv", "account_id,category,rebate_amount,rebate_asset,usdt_value\n");

    rebate_payout(&ws)
        .args(["disburse", "--addresses", "missing.json", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("address directory not found"));
}

#[test]
fn disburse_without_credentials_fails_accounts_not_the_run() {
    let ws = Workspace::new();
    ws.write(
        "rebate_summary.csv",
        "account_id,category,rebate_amount,rebate_asset,usdt_value\n1001,account summary,,,60\n,,,,\n",
    );
    ws.write("addresses.json", r#"{"1001": "0xabc"}"#);

    let assert = rebate_payout(&ws)
        .args(["--json", "disburse", "--addresses", "addresses.json", "--yes"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let last = stdout.lines().last().expect("summary line");
    let value: serde_json::Value = serde_json::from_str(last).expect("json output");
    assert_eq!(value["tally"]["failed"], 1);
    assert_eq!(value["tally"]["succeeded"], 0);
}

#[test]
fn disburse_json_without_yes_submits_nothing() {
    let ws = Workspace::new();
    ws.write(
        "rebate_summary.csv",
        "account_id,category,rebate_amount,rebate_asset,usdt_value\n1001,account summary,,,60\n,,,,\n",
    );
    ws.write("addresses.json", r#"{"1001": "0xabc"}"#);

    let assert = rebate_payout(&ws)
        .args(["--json", "disburse", "--addresses", "addresses.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pass --yes"));

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(!stdout.contains("\"tally\""));
}

#[test]
fn config_validate_rejects_inverted_jitter() {
    let ws = Workspace::new();
    ws.write("config.toml", "[retry]\njitter_min_ms = 900\njitter_max_ms = 100\n");

    rebate_payout(&ws)
        .args(["config", "validate", "--config", "config.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("jitter_max_ms"));
}

#[test]
fn config_show_uses_defaults_without_file() {
    let ws = Workspace::new();

    rebate_payout(&ws)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("built-in defaults"))
        .stdout(predicate::str::contains("BSC"));
}
