//! Exchange component factory.
//!
//! Provides [`ExchangeFactory`] for creating exchange-specific implementations
//! based on runtime configuration.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::adapter::outbound::binance::BinanceSessionFactory;
use crate::application::disburse::DisbursementEngine;
use crate::infrastructure::config::settings::{Config, ExchangeConfig};
use crate::port::outbound::exchange::SessionFactory;

/// Factory for creating exchange-specific components.
///
/// All factory methods are static; no instance state is required.
pub struct ExchangeFactory;

impl ExchangeFactory {
    /// Build the session factory for the configured exchange.
    ///
    /// Missing credentials are not an error here; sessions fail to build
    /// when the first exchange call is made.
    #[must_use]
    pub fn create_session_factory(config: &Config) -> Arc<dyn SessionFactory> {
        match &config.exchange {
            ExchangeConfig::Binance(binance) => {
                let factory =
                    BinanceSessionFactory::new(binance.clone(), config.credentials.clone());
                if factory.has_credentials() {
                    debug!(api_url = %binance.api_url, "Binance session factory ready");
                } else {
                    warn!("Binance credentials not set; exchange calls will fail");
                }
                Arc::new(factory)
            }
        }
    }

    /// Build a disbursement engine wired to the configured exchange.
    #[must_use]
    pub fn create_engine(config: &Config) -> DisbursementEngine {
        Self::engine_with(config, Self::create_session_factory(config))
    }

    /// Build a disbursement engine around an explicit session factory.
    #[must_use]
    pub fn engine_with(config: &Config, sessions: Arc<dyn SessionFactory>) -> DisbursementEngine {
        DisbursementEngine::new(
            sessions,
            config.disbursement_settings(),
            config.retry_policy(),
        )
    }
}
