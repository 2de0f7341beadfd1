//! Session factory for the Binance adapter.

use super::client::BinanceSession;
use super::settings::{BinanceConfig, BinanceCredentials};
use crate::error::ExchangeError;
use crate::port::outbound::exchange::{ExchangeSession, SessionFactory};

/// Builds a new [`BinanceSession`] for every request.
#[derive(Debug, Clone)]
pub struct BinanceSessionFactory {
    config: BinanceConfig,
    credentials: Option<BinanceCredentials>,
}

impl BinanceSessionFactory {
    #[must_use]
    pub fn new(config: BinanceConfig, credentials: Option<BinanceCredentials>) -> Self {
        Self {
            config,
            credentials,
        }
    }

    /// Factory with credentials read from the environment.
    #[must_use]
    pub fn from_env(config: BinanceConfig) -> Self {
        Self::new(config, BinanceCredentials::from_env())
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }
}

impl SessionFactory for BinanceSessionFactory {
    fn create_session(&self) -> Result<Box<dyn ExchangeSession>, ExchangeError> {
        let credentials = self
            .credentials
            .clone()
            .ok_or(ExchangeError::Credentials(BinanceCredentials::API_KEY_VAR))?;
        Ok(Box::new(BinanceSession::new(&self.config, credentials)?))
    }
}
