//! Logging configuration and initialization.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::error::{ConfigError, Result};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
    /// Optional plain-text log file, appended to alongside stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    "info".into()
}

fn default_format() -> String {
    "pretty".into()
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// `RUST_LOG` takes precedence over the configured level. Calling this
    /// twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the log file cannot be opened.
    pub fn init(&self) -> Result<()> {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
        layers.push(match self.format.as_str() {
            "json" => fmt::layer().json().with_writer(io::stderr).boxed(),
            _ => fmt::layer().with_writer(io::stderr).boxed(),
        });

        if let Some(path) = &self.file {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|err| ConfigError::InvalidValue {
                    field: "logging.file",
                    reason: format!("{}: {err}", path.display()),
                })?;
            layers.push(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .boxed(),
            );
        }

        let _ = tracing_subscriber::registry()
            .with(layers)
            .with(filter)
            .try_init();
        Ok(())
    }

    /// Shift the configured level by CLI verbosity flags.
    ///
    /// Each `-v` raises the level one step; `--quiet` drops to `warn`.
    #[must_use]
    pub fn with_verbosity(mut self, verbose: u8, quiet: bool) -> Self {
        if quiet {
            self.level = "warn".into();
        } else if verbose > 0 {
            const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
            let current = LEVELS
                .iter()
                .position(|level| self.level.eq_ignore_ascii_case(level))
                .unwrap_or(2);
            let index = (current + usize::from(verbose)).min(LEVELS.len() - 1);
            self.level = LEVELS[index].into();
        }
        self
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_flags_raise_level() {
        let config = LoggingConfig::default().with_verbosity(1, false);
        assert_eq!(config.level, "debug");

        let config = LoggingConfig::default().with_verbosity(5, false);
        assert_eq!(config.level, "trace");
    }

    #[test]
    fn quiet_wins_over_verbose() {
        let config = LoggingConfig::default().with_verbosity(2, true);
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn custom_directives_are_kept_without_flags() {
        let config = LoggingConfig {
            level: "rebate_payout=debug,reqwest=warn".into(),
            ..LoggingConfig::default()
        };

        assert_eq!(config.with_verbosity(0, false).level, "rebate_payout=debug,reqwest=warn");
    }
}
