//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the two batch jobs: rebate aggregation and disbursement.

pub mod aggregate;
pub mod disburse;
pub mod retry;
