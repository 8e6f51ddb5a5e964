//! Pair resolution against the pool factory registry.

use std::sync::Arc;

use serde_json::json;

use crate::domain::pair::RawPairEntry;
use crate::domain::{Address, PairKey, PairRecord};
use crate::error::OrchestrationError;
use crate::ledger::{ContractCall, LedgerClient, LedgerError};
use crate::service::query_as;

pub(crate) const FACTORY_SERVICE: &str = "Factory";

/// Looks up pools in the pool factory's pair registry.
///
/// Never caches: every call is a fresh query, so results are only as
/// fresh as the ledger's read path.
#[derive(Debug, Clone)]
pub struct PairResolver {
    pool_factory: Arc<dyn LedgerClient>,
}

impl PairResolver {
    /// Creates a resolver bound to the pool factory client.
    #[must_use]
    pub fn new(pool_factory: Arc<dyn LedgerClient>) -> Self {
        Self { pool_factory }
    }

    /// Returns the pool address registered for `key`, or `None` when the
    /// registry reports the zero address.
    ///
    /// The key is passed in its declared order; the pool factory resolves
    /// either order to the same pair.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::LedgerQueryError`] if the query fails
    /// or its reply is not an address.
    pub async fn resolve(&self, key: &PairKey) -> Result<Option<Address>, OrchestrationError> {
        let call = ContractCall::new(FACTORY_SERVICE, "GetPair")
            .arg(json!(key.token_a()))
            .arg(json!(key.token_b()));
        let address: Address =
            query_as(self.pool_factory.as_ref(), &call, "get_pair").await?;
        let resolved = address.non_zero();
        tracing::debug!(
            token_a = %key.token_a(),
            token_b = %key.token_b(),
            found = resolved.is_some(),
            "pair resolved"
        );
        Ok(resolved)
    }

    /// Lists every pair in the registry, in the registry's order.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::LedgerQueryError`] if the query fails
    /// or an entry is malformed.
    pub async fn list_all(&self) -> Result<Vec<PairRecord>, OrchestrationError> {
        let call = ContractCall::new(FACTORY_SERVICE, "Pairs");
        let raw: Vec<RawPairEntry> =
            query_as(self.pool_factory.as_ref(), &call, "list_pairs").await?;
        raw.into_iter()
            .map(|entry| {
                PairRecord::try_from(entry).map_err(|e| OrchestrationError::LedgerQueryError {
                    operation: "list_pairs",
                    source: LedgerError::Decode(e.to_string()),
                })
            })
            .collect()
    }
}
