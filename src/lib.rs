//! # launchpad-gateway
//!
//! REST gateway that mints token programs and creates trading pairs on a
//! program factory / pool factory contract pair.
//!
//! The gateway holds no durable state. Every request becomes a strictly
//! sequential chain of ledger calls (estimate gas, sign and submit, wait
//! for finalization, read back) executed through a JSON-RPC signing
//! bridge. Keys never enter this process: the bridge signs with a named
//! keyring account.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers + API-key check (api/)
//!     │
//!     ├── LaunchService: idempotency guard, program-then-pool (service/)
//!     ├── ProgramCreator / PoolCreator / PairResolver / FactoryQueries
//!     │
//!     ├── LedgerClient trait (ledger/)
//!     │
//!     └── JSON-RPC bridge ── program factory, pool factory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod service;
