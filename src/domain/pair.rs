//! Unordered token pairs and the pool factory's pair records.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::Address;

/// Error returned when both sides of a pair are the same token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("pair requires two distinct token addresses, got {0} twice")]
pub struct IdenticalTokens(pub Address);

/// Unordered pair of two distinct token addresses.
///
/// `{A, B}` and `{B, A}` compare and hash equal. The declared order is
/// kept and used verbatim when querying the ledger, since the pool factory
/// owns canonicalization and this crate makes no assumption about the
/// order it stores internally.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairKey {
    token_a: Address,
    token_b: Address,
}

impl PairKey {
    /// Creates a pair key from two distinct addresses.
    ///
    /// # Errors
    ///
    /// Returns [`IdenticalTokens`] if `token_a == token_b`.
    pub fn new(token_a: Address, token_b: Address) -> Result<Self, IdenticalTokens> {
        if token_a == token_b {
            return Err(IdenticalTokens(token_a));
        }
        Ok(Self { token_a, token_b })
    }

    /// First token, as declared.
    #[must_use]
    pub const fn token_a(&self) -> Address {
        self.token_a
    }

    /// Second token, as declared.
    #[must_use]
    pub const fn token_b(&self) -> Address {
        self.token_b
    }

    /// Returns `true` if `token` is one side of the pair.
    #[must_use]
    pub fn contains(&self, token: Address) -> bool {
        self.token_a == token || self.token_b == token
    }

    /// The same pair with sides swapped.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self {
            token_a: self.token_b,
            token_b: self.token_a,
        }
    }

    fn sorted(&self) -> (Address, Address) {
        if self.token_a <= self.token_b {
            (self.token_a, self.token_b)
        } else {
            (self.token_b, self.token_a)
        }
    }
}

impl PartialEq for PairKey {
    fn eq(&self, other: &Self) -> bool {
        self.sorted() == other.sorted()
    }
}

impl Eq for PairKey {}

impl Hash for PairKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

/// A pool registered by the pool factory.
///
/// Append-only on the ledger; read through queries and never cached past a
/// single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairRecord {
    /// The two tokens of the pool, in the order the registry reports.
    #[serde(flatten)]
    pub key: PairKey,
    /// Address of the pair program.
    pub pair_address: Address,
}

/// Wire shape of one `Pairs` entry: `[[token0, token1], pair]`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawPairEntry((Address, Address), Address);

impl TryFrom<RawPairEntry> for PairRecord {
    type Error = IdenticalTokens;

    fn try_from(raw: RawPairEntry) -> Result<Self, Self::Error> {
        let RawPairEntry((token0, token1), pair_address) = raw;
        Ok(Self {
            key: PairKey::new(token0, token1)?,
            pair_address,
        })
    }
}
