//! Path utilities for rebate-payout.
//!
//! User-level files live under `~/.rebate-payout/`:
//! - `~/.rebate-payout/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the rebate-payout home directory (`~/.rebate-payout/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rebate-payout")
}

/// Returns the default config file path (`~/.rebate-payout/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
