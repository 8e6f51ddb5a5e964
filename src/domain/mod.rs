//! Domain layer: ledger addresses, program configuration, pair keys,
//! decoded transaction outcomes and registry read models.
//!
//! Everything here is a request-scoped value object. Durable state
//! (programs, pairs, registries) lives on the ledger only.

pub mod address;
pub mod gas;
pub mod outcome;
pub mod pair;
pub mod program_config;
pub mod registry;

pub use address::{Address, AddressParseError};
pub use gas::{GasBudget, ONE_VARA};
pub use outcome::TransactionOutcome;
pub use pair::{IdenticalTokens, PairKey, PairRecord};
pub use program_config::{MintAmount, ProgramConfigError, ProgramInitConfig};
pub use registry::{CreatorRegistration, ProgramIndexEntry, RegisteredProgram};
