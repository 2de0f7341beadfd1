//! Exchange wiring.

pub mod factory;
