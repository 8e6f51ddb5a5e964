//! Value and gas attached to a signed call.

use serde::Serialize;

/// One native token (VARA) in minor units.
pub const ONE_VARA: u128 = 1_000_000_000_000;

/// Budget attached to a fee-bearing call.
///
/// `value` is fixed per deployment; `gas` comes from the ledger's gas
/// estimation against current chain state, immediately before signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GasBudget {
    /// Native currency attached to the call, in minor units.
    pub value: u128,
    /// Gas limit obtained from estimation.
    pub gas: u64,
}

impl GasBudget {
    /// Creates a budget from a fixed value and an estimated gas limit.
    #[must_use]
    pub const fn new(value: u128, gas: u64) -> Self {
        Self { value, gas }
    }
}
