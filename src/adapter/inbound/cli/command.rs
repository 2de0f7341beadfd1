//! Command-line interface definitions.
//!
//! Defines the CLI structure for the rebate-payout application using `clap`.
//! The two batch jobs are separate subcommands: `aggregate` builds the
//! summary from a rebate export, `disburse` pays it out.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Affiliate rebate aggregation and payout CLI
#[derive(Parser, Debug)]
#[command(name = "rebate-payout")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate a rebate export into a per-account summary
    Aggregate(AggregateArgs),

    /// Pay out summary totals to registered addresses
    Disburse(DisburseArgs),

    /// Show the settlement asset balance on the exchange
    Balance(ConfigPathArg),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Commands {
    /// The `--config` path given to this command, if any.
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> {
        match self {
            Self::Aggregate(_) => None,
            Self::Disburse(args) => args.config.config.as_deref(),
            Self::Balance(arg)
            | Self::Config(ConfigCommand::Show(arg) | ConfigCommand::Validate(arg)) => {
                arg.config.as_deref()
            }
        }
    }
}

/// Subcommands for `rebate-payout config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared argument struct for commands that read the configuration.
///
/// Without `--config`, `~/.rebate-payout/config.toml` is used when present
/// and built-in defaults otherwise.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `aggregate` subcommand.
#[derive(Parser, Debug)]
pub struct AggregateArgs {
    /// Rebate records CSV (affiliate export).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Where to write the summary CSV.
    #[arg(short, long, default_value = "rebate_summary.csv")]
    pub output: PathBuf,
}

/// Arguments for the `disburse` subcommand.
#[derive(Parser, Debug)]
pub struct DisburseArgs {
    /// Summary CSV produced by `aggregate`.
    #[arg(short, long, default_value = "rebate_summary.csv")]
    pub summary: PathBuf,

    /// JSON object mapping account ids to payout addresses.
    #[arg(short, long)]
    pub addresses: PathBuf,

    /// Print the payout plan without calling the exchange.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt. Required with `--json`.
    #[arg(short = 'y', long)]
    pub yes: bool,

    #[command(flatten)]
    pub config: ConfigPathArg,
}
