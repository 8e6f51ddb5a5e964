//! Decoded results of factory calls.
//!
//! The program factory replies to state-changing calls with a
//! `ContractResponse` enum. The bridge decodes it into an externally tagged
//! JSON object whose single key is the variant name in camelCase, e.g.
//! `{"programCreated": {"id": 3, "address": "0x…", "init_config": {…}}}`.
//! Only the discriminant is trusted; success of the call alone says
//! nothing about which variant was produced.

use serde::{Deserialize, Serialize};

use super::{Address, ProgramInitConfig};

/// Decoded, contract-defined result of a signed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionOutcome {
    /// A new token program was minted.
    ProgramCreated {
        /// Sequential program id assigned by the factory.
        id: u64,
        /// Address of the minted program.
        address: Address,
        /// Configuration the program was initialised with.
        init_config: ProgramInitConfig,
    },
    /// The factory's per-program gas allowance changed.
    GasUpdatedSuccessfully {
        /// Admin that issued the update.
        updated_by: Address,
        /// New gas amount.
        new_gas_amount: u64,
    },
    /// The factory's program code id changed.
    CodeIdUpdatedSuccessfully {
        /// Admin that issued the update.
        updated_by: Address,
        /// New code id, hex encoded.
        new_code_id: String,
    },
    /// An admin was added to the factory.
    AdminAdded {
        /// Admin that issued the update.
        updated_by: Address,
        /// Newly added admin.
        admin_actor_id: Address,
    },
    /// A program was removed from the factory registry.
    RegistryRemoved {
        /// Admin that issued the removal.
        removed_by: Address,
        /// Id of the removed program.
        program_for_id: u64,
    },
    /// A pool was created through the factory.
    PoolCreated {
        /// First token.
        token_a: Address,
        /// Second token.
        token_b: Address,
        /// Pair program address.
        pair: Address,
    },
}

impl TransactionOutcome {
    /// Decodes a bridge reply into an outcome.
    ///
    /// # Errors
    ///
    /// Returns the decoder message when the reply is not a known variant or
    /// its payload is malformed.
    pub fn decode(reply: serde_json::Value) -> Result<Self, String> {
        serde_json::from_value(reply).map_err(|e| e.to_string())
    }

    /// Variant name, as used in logs and error messages.
    #[must_use]
    pub const fn discriminant(&self) -> &'static str {
        match self {
            Self::ProgramCreated { .. } => "programCreated",
            Self::GasUpdatedSuccessfully { .. } => "gasUpdatedSuccessfully",
            Self::CodeIdUpdatedSuccessfully { .. } => "codeIdUpdatedSuccessfully",
            Self::AdminAdded { .. } => "adminAdded",
            Self::RegistryRemoved { .. } => "registryRemoved",
            Self::PoolCreated { .. } => "poolCreated",
        }
    }

    /// Address of the minted program, if this is a `programCreated` outcome
    /// carrying a non-zero address.
    #[must_use]
    pub fn program_address(&self) -> Option<Address> {
        match self {
            Self::ProgramCreated { address, .. } => address.non_zero(),
            _ => None,
        }
    }
}
