//! Actor address on the ledger.
//!
//! [`Address`] is a newtype around a 32-byte actor id. Its textual form is
//! `0x` followed by exactly 64 hex characters, which is also how it is
//! serialized to JSON and passed to the ledger bridge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 32;

/// Identifier of an account or a contract instance on the ledger.
///
/// Equality is exact byte equality. The all-zero value is the ledger's
/// "absent" sentinel (see [`Address::ZERO`]) and must never be handed to a
/// caller as if it named a real program or pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The zero address sentinel.
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Returns `true` for the zero sentinel.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }

    /// Converts the ledger's sentinel encoding into an explicit absence.
    #[must_use]
    pub fn non_zero(self) -> Option<Self> {
        if self.is_zero() { None } else { Some(self) }
    }
}

/// Reasons a string is not a well-formed [`Address`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    /// The `0x` prefix is missing.
    #[error("address must start with 0x")]
    MissingPrefix,
    /// Wrong number of hex characters after the prefix.
    #[error("address must have 64 hex characters, got {0}")]
    InvalidLength(usize),
    /// A non-hex character was found.
    #[error("address contains non-hex characters")]
    InvalidHex,
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .ok_or(AddressParseError::MissingPrefix)?;
        if digits.len() != ADDRESS_LEN * 2 {
            return Err(AddressParseError::InvalidLength(digits.len()));
        }
        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| AddressParseError::InvalidHex)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const ALPHA: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    #[test]
    fn parses_and_displays_lowercase() {
        let upper = ALPHA.to_uppercase().replacen("0X", "0x", 1);
        let Ok(addr) = upper.parse::<Address>() else {
            panic!("valid address");
        };
        assert_eq!(addr.to_string(), ALPHA);
        assert_eq!(addr.as_bytes(), &[0xaa; ADDRESS_LEN]);
    }

    #[test]
    fn rejects_missing_prefix() {
        let raw = ALPHA.trim_start_matches("0x");
        assert_eq!(
            raw.parse::<Address>(),
            Err(AddressParseError::MissingPrefix)
        );
    }

    #[test]
    fn rejects_short_and_non_hex() {
        assert_eq!(
            "0xabcd".parse::<Address>(),
            Err(AddressParseError::InvalidLength(4))
        );
        let bad = format!("0x{}", "g".repeat(64));
        assert_eq!(bad.parse::<Address>(), Err(AddressParseError::InvalidHex));
    }

    #[test]
    fn zero_sentinel_maps_to_none() {
        assert!(Address::ZERO.is_zero());
        assert_eq!(Address::ZERO.non_zero(), None);
        let addr = Address::from_bytes([7u8; ADDRESS_LEN]);
        assert_eq!(addr.non_zero(), Some(addr));
    }

    #[test]
    fn serde_uses_hex_string() {
        let addr = Address::from_bytes([0xaa; ADDRESS_LEN]);
        let Ok(json) = serde_json::to_string(&addr) else {
            panic!("serialization failed");
        };
        assert_eq!(json, format!("\"{ALPHA}\""));
        let Ok(back) = serde_json::from_str::<Address>(&json) else {
            panic!("deserialization failed");
        };
        assert_eq!(back, addr);
        assert!(serde_json::from_str::<Address>("\"0x12\"").is_err());
    }
}
