//! Initial configuration of a token program minted by the factory.
//!
//! [`ProgramInitConfig`] can only be built through
//! [`ProgramInitConfig::new`], which enforces the boundary invariants
//! (name/symbol length, non-empty admins, decimal mint amount) and
//! upper-cases the symbol. The creators downstream trust these invariants
//! and do not re-validate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Address;

/// Maximum program name length, in characters.
pub const MAX_NAME_LEN: usize = 100;
/// Maximum symbol length, in characters.
pub const MAX_SYMBOL_LEN: usize = 20;

/// Violations of the [`ProgramInitConfig`] invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgramConfigError {
    /// Name is empty or longer than [`MAX_NAME_LEN`].
    #[error("name must be between 1 and {MAX_NAME_LEN} characters")]
    InvalidName,
    /// Symbol is empty or longer than [`MAX_SYMBOL_LEN`].
    #[error("symbol must be between 1 and {MAX_SYMBOL_LEN} characters")]
    InvalidSymbol,
    /// No admin addresses were supplied.
    #[error("at least one admin address is required")]
    NoAdmins,
    /// Mint amount is not a string of decimal digits.
    #[error("mint amount must be a non-negative integer string")]
    InvalidMintAmount,
}

/// Non-negative integer of unbounded width, kept in canonical decimal form.
///
/// Never parsed into a native integer: the ledger bridge receives the
/// decimal string and performs the encoding for the contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MintAmount(String);

impl MintAmount {
    /// Returns the canonical decimal representation (no leading zeros).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == "0"
    }
}

impl FromStr for MintAmount {
    type Err = ProgramConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ProgramConfigError::InvalidMintAmount);
        }
        let trimmed = s.trim_start_matches('0');
        let canonical = if trimmed.is_empty() { "0" } else { trimmed };
        Ok(Self(canonical.to_string()))
    }
}

impl fmt::Display for MintAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for MintAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MintAmount {
    /// Accepts either a decimal string or a JSON integer, since ledger
    /// replies may encode `u128` values either way.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let text = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected mint amount, got {other}"
                )));
            }
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Initial configuration of a fungible-token program.
///
/// Field names match the factory contract's `VftInitConfig` so the struct
/// serializes directly into the call arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInitConfig {
    name: String,
    symbol: String,
    decimals: u8,
    admins: Vec<Address>,
    mint_amount: MintAmount,
    mint_to: Address,
}

impl ProgramInitConfig {
    /// Builds a validated configuration, upper-casing `symbol`.
    ///
    /// Lengths are counted in characters, not bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramConfigError`] when any invariant is violated.
    pub fn new(
        name: impl Into<String>,
        symbol: &str,
        decimals: u8,
        admins: Vec<Address>,
        mint_amount: MintAmount,
        mint_to: Address,
    ) -> Result<Self, ProgramConfigError> {
        let name = name.into();
        if !(1..=MAX_NAME_LEN).contains(&name.chars().count()) {
            return Err(ProgramConfigError::InvalidName);
        }
        if !(1..=MAX_SYMBOL_LEN).contains(&symbol.chars().count()) {
            return Err(ProgramConfigError::InvalidSymbol);
        }
        if admins.is_empty() {
            return Err(ProgramConfigError::NoAdmins);
        }
        Ok(Self {
            name,
            symbol: symbol.to_uppercase(),
            decimals,
            admins,
            mint_amount,
            mint_to,
        })
    }

    /// Program name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Upper-cased ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Decimal places of the token.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Admin accounts, in the order supplied.
    #[must_use]
    pub fn admins(&self) -> &[Address] {
        &self.admins
    }

    /// Amount minted at creation.
    #[must_use]
    pub const fn mint_amount(&self) -> &MintAmount {
        &self.mint_amount
    }

    /// Recipient of the initial mint.
    #[must_use]
    pub const fn mint_to(&self) -> Address {
        self.mint_to
    }
}
