//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`exchange`] - Scripted [`SessionFactory`](crate::port::outbound::exchange::SessionFactory)
//!   that records sessions, balance lookups and withdrawals.
//! - [`domain`] - Builders for summary rows and account snapshots.

pub mod domain;
pub mod exchange;
