//! Handler for the `balance` command.

use serde_json::json;

use super::output;
use crate::domain::money::format_amount;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::exchange::factory::ExchangeFactory;

/// Execute `balance`.
pub async fn execute(config: &Config) -> Result<()> {
    let engine = ExchangeFactory::create_engine(config);
    let asset = engine.settings().asset.clone();

    let pb = output::spinner(&format!("Fetching {asset} balance"));
    let balance = match engine.fetch_balance().await {
        Ok(balance) => balance,
        Err(err) => {
            output::spinner_fail(&pb, "Fetching balance");
            return Err(err.into());
        }
    };
    output::spinner_success(&pb, "Fetched balance");

    if output::is_json() {
        output::json_output(json!({
            "command": "balance",
            "exchange": config.exchange.name(),
            "asset": asset,
            "free": balance.map(format_amount),
        }));
        return Ok(());
    }

    output::section("Balance");
    output::field("Exchange", config.exchange.name());
    match balance {
        Some(free) => output::field(
            "Free",
            format!("{} {asset}", output::highlight(format_amount(free))),
        ),
        None => output::warning(&format!("Account holds no {asset}")),
    }
    Ok(())
}
