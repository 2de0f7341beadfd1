//! Outbound adapters (driven side).

pub mod binance;
pub mod file;
