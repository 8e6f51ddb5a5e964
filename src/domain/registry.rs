//! Read models for the program factory's registry queries.
//!
//! The ledger encodes anonymous structs as JSON arrays; these types accept
//! that positional shape and serialize back as named objects.

use serde::{Deserialize, Serialize};

use super::{Address, ProgramInitConfig};

/// One `IdToAddress` entry: program id and its address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u64, Address)")]
pub struct ProgramIndexEntry {
    /// Sequential program id.
    pub id: u64,
    /// Program address.
    pub address: Address,
}

impl From<(u64, Address)> for ProgramIndexEntry {
    fn from((id, address): (u64, Address)) -> Self {
        Self { id, address }
    }
}

/// A program recorded under its creator in the factory registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u64, ProgramInitConfig)")]
pub struct RegisteredProgram {
    /// Sequential program id.
    pub id: u64,
    /// Configuration the program was created with.
    pub init_config: ProgramInitConfig,
}

impl From<(u64, ProgramInitConfig)> for RegisteredProgram {
    fn from((id, init_config): (u64, ProgramInitConfig)) -> Self {
        Self { id, init_config }
    }
}

/// All programs created by one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Address, Vec<RegisteredProgram>)")]
pub struct CreatorRegistration {
    /// Account that created the programs.
    pub creator: Address,
    /// Programs created by `creator`.
    pub programs: Vec<RegisteredProgram>,
}

impl From<(Address, Vec<RegisteredProgram>)> for CreatorRegistration {
    fn from((creator, programs): (Address, Vec<RegisteredProgram>)) -> Self {
        Self { creator, programs }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn decodes_positional_registry() {
        let creator = Address::from_bytes([1u8; 32]);
        let json = serde_json::json!([[
            creator.to_string(),
            [[4, {
                "name": "Token Alpha",
                "symbol": "ALPHA",
                "decimals": 12,
                "admins": [creator.to_string()],
                "mint_amount": 5,
                "mint_to": creator.to_string(),
            }]]
        ]]);
        let Ok(registry) = serde_json::from_value::<Vec<CreatorRegistration>>(json) else {
            panic!("valid registry");
        };
        let Some(entry) = registry.first() else {
            panic!("one creator");
        };
        assert_eq!(entry.creator, creator);
        let Some(program) = entry.programs.first() else {
            panic!("one program");
        };
        assert_eq!(program.id, 4);
        assert_eq!(program.init_config.mint_amount().as_str(), "5");
    }

    #[test]
    fn index_entry_serializes_as_object() {
        let entry = ProgramIndexEntry::from((2, Address::from_bytes([3u8; 32])));
        let Ok(json) = serde_json::to_value(entry) else {
            panic!("serialization failed");
        };
        assert_eq!(json["id"], 2);
    }
}
