//! Binance exchange configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// REST connection settings for the Binance spot/SAPI endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BinanceConfig {
    /// REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Total request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connection establishment timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Window the server accepts a signed request's timestamp in.
    #[serde(default = "default_recv_window_ms")]
    pub recv_window_ms: u64,
}

fn default_api_url() -> String {
    "https://api.binance.com".into()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

const fn default_recv_window_ms() -> u64 {
    5_000
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            recv_window_ms: default_recv_window_ms(),
        }
    }
}

/// API key pair. Loaded from the environment, never from the config file.
#[derive(Clone, PartialEq, Eq)]
pub struct BinanceCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl BinanceCredentials {
    pub const API_KEY_VAR: &'static str = "BINANCE_API_KEY";
    pub const API_SECRET_VAR: &'static str = "BINANCE_API_SECRET";

    /// Read both variables; `None` unless both are set and non-empty.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        Some(Self {
            api_key: read(Self::API_KEY_VAR)?,
            api_secret: read(Self::API_SECRET_VAR)?,
        })
    }
}

impl fmt::Debug for BinanceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinanceCredentials")
            .field("api_key", &mask(&self.api_key))
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

fn mask(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{visible}…")
}
