//! Rebate-payout - affiliate rebate aggregation and USDT disbursement.
//!
//! The crate runs two independent batch jobs:
//!
//! - **Aggregation** reads a per-trade rebate export, groups it by account and
//!   product category, and writes a summary CSV.
//! - **Disbursement** reads that summary and an address directory, computes a
//!   payout per account, and withdraws it from an exchange account one
//!   account at a time, retrying clock-desync rejections with fresh sessions.
//!
//! # Modules
//!
//! - [`domain`] - Records, summaries, payout policy and outcomes
//! - [`port`] - Exchange and file store traits
//! - [`application`] - Aggregator, disbursement engine and retry protocol
//! - [`adapter`] - CLI, CSV/JSON files and the Binance REST client
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Scripted exchange and row builders for tests

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
