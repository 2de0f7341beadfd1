use clap::Parser;

use rebate_payout::adapter::inbound::cli::command::Cli;
use rebate_payout::adapter::inbound::cli::output::{self, OutputConfig};
use rebate_payout::adapter::inbound::cli::{apply_color, run};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    apply_color(&cli.color);
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    if let Err(e) = run(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
