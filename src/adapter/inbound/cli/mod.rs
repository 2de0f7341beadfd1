//! CLI module graph and command dispatch.

pub mod aggregate;
pub mod balance;
pub mod command;
pub mod config;
pub mod disburse;
pub mod output;
pub mod paths;

use std::path::Path;

use tracing::debug;

use self::command::{Cli, ColorChoice, Commands, ConfigCommand};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Apply the `--color` choice to every styled write.
pub fn apply_color(choice: &ColorChoice) {
    match choice {
        ColorChoice::Auto => owo_colors::unset_override(),
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
    }
}

/// Resolve the configuration for a command.
///
/// An explicit path must exist. Without one, the default location is used
/// when present and built-in defaults otherwise.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read, parsed or validated.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path);
    }

    let path = paths::default_config();
    if path.exists() {
        debug!(path = %path.display(), "Loading default config");
        Config::load(&path)
    } else {
        debug!("No config file, using defaults");
        Ok(Config::from_env())
    }
}

/// Execute the parsed command line.
///
/// Loads the configuration once, starts logging, then runs the command.
///
/// # Errors
///
/// Returns the first fatal error of the selected command.
pub async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.command.config_path().map(Path::to_path_buf);
    let config = load_config(config_path.as_deref())?;
    config
        .logging
        .clone()
        .with_verbosity(cli.verbose, cli.quiet)
        .init()?;

    match cli.command {
        Commands::Aggregate(args) => aggregate::execute(&args),
        Commands::Disburse(args) => disburse::execute(&args, &config).await,
        Commands::Balance(_) => balance::execute(&config).await,
        Commands::Config(ConfigCommand::Show(_)) => {
            config::execute_show(config_path.as_deref(), &config)
        }
        Commands::Config(ConfigCommand::Validate(_)) => {
            config::execute_validate(config_path.as_deref(), &config)
        }
    }
}
