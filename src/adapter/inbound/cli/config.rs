//! Handler for the `config` command group.

use std::path::Path;

use serde_json::json;

use super::{output, paths};
use crate::error::Result;
use crate::infrastructure::config::settings::{Config, ExchangeConfig};

fn source_label(path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => {
            let default = paths::default_config();
            if default.exists() {
                default.display().to_string()
            } else {
                "(built-in defaults)".to_string()
            }
        }
    }
}

/// Execute `config show`.
pub fn execute_show(path: Option<&Path>, config: &Config) -> Result<()> {
    let source = source_label(path);

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "source": source,
            "config": serde_json::to_value(config)?,
            "credentials": config.credentials.is_some(),
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Source", source);

    output::section("Exchange");
    output::field("Type", config.exchange.name());
    match &config.exchange {
        ExchangeConfig::Binance(binance) => {
            output::field("API", &binance.api_url);
            output::field("Timeout", format!("{}ms", binance.timeout_ms));
            output::field("Recv window", format!("{}ms", binance.recv_window_ms));
        }
    }
    output::field(
        "Credentials",
        if config.credentials.is_some() {
            output::positive("set")
        } else {
            output::negative("missing")
        },
    );

    let disbursement = &config.disbursement;
    output::section("Disbursement");
    output::field("Asset", &disbursement.asset);
    output::field("Network", &disbursement.network);
    output::field(
        "Share",
        format!(
            "{}/{}",
            disbursement.payout_numerator, disbursement.payout_denominator
        ),
    );
    output::field("Minimum", &disbursement.min_payout);
    output::field("Pacing", format!("{}ms", disbursement.pacing_ms));

    output::section("Retry");
    output::field("Attempts", config.retry.max_attempts);
    output::field(
        "Jitter",
        format!(
            "{}-{}ms",
            config.retry.jitter_min_ms, config.retry.jitter_max_ms
        ),
    );

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);
    if let Some(file) = &config.logging.file {
        output::field("File", file.display());
    }
    Ok(())
}

/// Execute `config validate`.
///
/// Loading already validated the file; this reports the result.
pub fn execute_validate(path: Option<&Path>, config: &Config) -> Result<()> {
    let source = source_label(path);

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "source": source,
            "valid": true,
            "credentials": config.credentials.is_some(),
        }));
        return Ok(());
    }

    output::success(&format!("Configuration is valid ({source})"));
    if config.credentials.is_none() {
        output::warning("BINANCE_API_KEY / BINANCE_API_SECRET are not set");
        output::hint("add them to the environment or a .env file before disbursing");
    }
    Ok(())
}
