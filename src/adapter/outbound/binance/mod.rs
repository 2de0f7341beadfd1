//! Binance exchange integration.

pub mod client;
pub mod dto;
pub mod factory;
pub mod settings;

pub use client::BinanceSession;
pub use factory::BinanceSessionFactory;
pub use settings::{BinanceConfig, BinanceCredentials};
