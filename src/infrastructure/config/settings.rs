//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; exchange credentials come from the
//! `BINANCE_API_KEY` / `BINANCE_API_SECRET` environment variables only.
//!
//! # Example
//!
//! ```no_run
//! use rebate_payout::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging()?;
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use crate::adapter::outbound::binance::{BinanceConfig, BinanceCredentials};
use crate::application::disburse::DisbursementSettings;
use crate::application::retry::RetryPolicy;
use crate::domain::PayoutPolicy;
use crate::error::{ConfigError, Result};

/// Exchange-specific configuration variant.
///
/// The active variant is determined by the `type` field in the TOML config.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExchangeConfig {
    /// Binance spot account holding the rebate pool.
    Binance(BinanceConfig),
}

impl ExchangeConfig {
    /// Short name of the active exchange.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Binance(_) => "binance",
        }
    }

    /// REST base URL of the active exchange.
    #[must_use]
    pub fn api_url(&self) -> &str {
        match self {
            Self::Binance(config) => &config.api_url,
        }
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self::Binance(BinanceConfig::default())
    }
}

/// Payout parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisbursementConfig {
    /// Asset withdrawn to each account.
    pub asset: String,
    /// Settlement network for withdrawals.
    pub network: String,
    /// Payout share numerator.
    pub payout_numerator: Decimal,
    /// Payout share denominator.
    pub payout_denominator: Decimal,
    /// Smallest payout worth transferring.
    pub min_payout: Decimal,
    /// Pause after each successful withdrawal, in milliseconds.
    pub pacing_ms: u64,
}

impl Default for DisbursementConfig {
    fn default() -> Self {
        Self {
            asset: "USDT".into(),
            network: "BSC".into(),
            payout_numerator: dec!(25),
            payout_denominator: dec!(30),
            min_payout: Decimal::ONE,
            pacing_ms: 1_000,
        }
    }
}

/// Clock-desync retry bounds for exchange calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Guarded attempts before the final unguarded call.
    pub max_attempts: u32,
    /// Lower jitter bound in milliseconds.
    pub jitter_min_ms: u64,
    /// Upper jitter bound in milliseconds.
    pub jitter_max_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            jitter_min_ms: 500,
            jitter_max_ms: 1_000,
        }
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Exchange holding the rebate pool.
    #[serde(default)]
    pub exchange: ExchangeConfig,

    /// Payout share, floor and settlement asset.
    #[serde(default)]
    pub disbursement: DisbursementConfig,

    /// Retry bounds for exchange calls.
    #[serde(default)]
    pub retry: RetryConfig,

    /// API credentials, loaded from the environment.
    #[serde(skip)]
    pub credentials: Option<BinanceCredentials>,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Loads exchange credentials from the environment, never from the file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., zero payout denominator)
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        let config = config.with_env_credentials();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Default settings with credentials from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_credentials()
    }

    fn with_env_credentials(mut self) -> Self {
        self.credentials = BinanceCredentials::from_env();
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] for empty required strings and
    /// [`ConfigError::InvalidValue`] for out-of-range numbers.
    pub fn validate(&self) -> Result<()> {
        if self.exchange.api_url().trim().is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }

        let disbursement = &self.disbursement;
        if disbursement.asset.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "asset" }.into());
        }
        if disbursement.network.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "network" }.into());
        }
        if disbursement.payout_numerator <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "payout_numerator",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if disbursement.payout_denominator <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "payout_denominator",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if disbursement.min_payout < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "min_payout",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }

        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.retry.jitter_min_ms > self.retry.jitter_max_ms {
            return Err(ConfigError::InvalidValue {
                field: "jitter_max_ms",
                reason: "must be >= jitter_min_ms".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Settlement parameters for the disbursement engine.
    #[must_use]
    pub fn disbursement_settings(&self) -> DisbursementSettings {
        let disbursement = &self.disbursement;
        DisbursementSettings {
            asset: disbursement.asset.trim().to_uppercase(),
            network: disbursement.network.trim().to_uppercase(),
            policy: PayoutPolicy::new(
                disbursement.payout_numerator,
                disbursement.payout_denominator,
                disbursement.min_payout,
            ),
            pacing: Duration::from_millis(disbursement.pacing_ms),
        }
    }

    /// Retry bounds for exchange calls.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_attempts,
            Duration::from_millis(self.retry.jitter_min_ms),
            Duration::from_millis(self.retry.jitter_max_ms),
        )
    }

    /// Initialize logging with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured log file cannot be opened.
    pub fn init_logging(&self) -> Result<()> {
        self.logging.init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::parse_toml("").unwrap();

        assert_eq!(config.exchange.name(), "binance");
        assert_eq!(config.disbursement_settings(), DisbursementSettings::default());
        assert_eq!(config.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn settlement_symbols_are_uppercased() {
        let config = Config::parse_toml("[disbursement]\nasset = \"usdt\"\nnetwork = \" bsc \"\n")
            .unwrap();
        let settings = config.disbursement_settings();

        assert_eq!(settings.asset, "USDT");
        assert_eq!(settings.network, "BSC");
    }

    #[test]
    fn zero_denominator_is_rejected() {
        let result = Config::parse_toml("[disbursement]\npayout_denominator = 0\n");

        assert!(matches!(
            result,
            Err(crate::error::Error::Config(ConfigError::InvalidValue {
                field: "payout_denominator",
                ..
            }))
        ));
    }

    #[test]
    fn inverted_jitter_bounds_are_rejected() {
        let result = Config::parse_toml("[retry]\njitter_min_ms = 900\njitter_max_ms = 100\n");

        assert!(matches!(
            result,
            Err(crate::error::Error::Config(ConfigError::InvalidValue {
                field: "jitter_max_ms",
                ..
            }))
        ));
    }

    #[test]
    fn unknown_exchange_type_is_a_parse_error() {
        let result = Config::parse_toml("[exchange]\ntype = \"kraken\"\n");

        assert!(matches!(
            result,
            Err(crate::error::Error::Config(ConfigError::Parse(_)))
        ));
    }
}
