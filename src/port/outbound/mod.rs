//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: the exchange that
//! holds the rebate pool and the file stores the batch jobs read and write.

pub mod exchange;
pub mod store;
