//! Settling delays between a finalized write and a consistent read.
//!
//! The ledger finalizes writes before queries observe them. Two flat waits
//! bridge that gap: after minting a program (before pairing it) and after
//! the registered-token pool creation (before enumerating pairs). Both are
//! local to one request's sequence, never global throttles.

use std::time::Duration;

/// Wait after the program mint finalizes.
pub const DEFAULT_POST_MINT: Duration = Duration::from_millis(2_000);
/// Wait after a registered-token pool creation finalizes.
pub const DEFAULT_POST_POOL: Duration = Duration::from_millis(3_000);

/// Settling delays used by the orchestration sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlingDelays {
    /// Between the mint and the pool creation.
    pub post_mint: Duration,
    /// Between the registered-token pool creation and pair enumeration.
    pub post_pool: Duration,
}

impl SettlingDelays {
    /// No waiting at all; for ledgers with read-your-writes consistency.
    pub const NONE: Self = Self {
        post_mint: Duration::ZERO,
        post_pool: Duration::ZERO,
    };
}

impl Default for SettlingDelays {
    fn default() -> Self {
        Self {
            post_mint: DEFAULT_POST_MINT,
            post_pool: DEFAULT_POST_POOL,
        }
    }
}

/// Suspends the current request for `delay`.
pub(crate) async fn settle(delay: Duration, reason: &'static str) {
    if delay.is_zero() {
        return;
    }
    tracing::debug!(delay_ms = delay.as_millis() as u64, reason, "waiting for ledger to settle");
    tokio::time::sleep(delay).await;
}
