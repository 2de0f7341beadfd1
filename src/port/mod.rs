//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (the exchange, the file artifacts).
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │Exchange │            │  Summary    │              │ Directory │
//! │ Adapter │            │  Store      │              │  Source   │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`outbound::exchange::ExchangeSession`], [`outbound::exchange::SessionFactory`] - Exchange integration
//! - [`outbound::store::RecordSource`], [`outbound::store::SummaryStore`],
//!   [`outbound::store::DirectorySource`] - Batch artifact persistence

pub mod outbound;
