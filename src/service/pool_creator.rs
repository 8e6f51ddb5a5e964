//! Pool creation through the program factory.
//!
//! Both paths submit a signed, fee-bearing call and then read the result
//! back from the pool factory registry, because the write's reply is not
//! trusted as proof of a resolvable pair:
//!
//! - explicit pair: the key is known, so it is re-resolved directly;
//! - registered token: the contract may substitute the quote token, so
//!   after a settling delay the newest registry entry is taken.
//!
//! Neither path checks for an existing pair first; that guard lives in
//! [`super::LaunchService`] so callers can tell "already existed" from
//! "just created".

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use super::settle::settle;
use super::{PairResolver, submit_signed};
use crate::domain::{Address, PairKey};
use crate::error::OrchestrationError;
use crate::ledger::{ContractCall, LedgerClient, Signer};

/// Submits pool creation calls and resolves the resulting pair address.
#[derive(Debug, Clone)]
pub struct PoolCreator {
    factory: Arc<dyn LedgerClient>,
    resolver: PairResolver,
    call_value: u128,
    post_pool_delay: Duration,
}

impl PoolCreator {
    /// Creates a pool creator.
    ///
    /// `factory` is the program factory client that accepts the creation
    /// calls; `resolver` reads the pool factory registry.
    #[must_use]
    pub fn new(
        factory: Arc<dyn LedgerClient>,
        resolver: PairResolver,
        call_value: u128,
        post_pool_delay: Duration,
    ) -> Self {
        Self {
            factory,
            resolver,
            call_value,
            post_pool_delay,
        }
    }

    /// Creates a pool for two explicit tokens and returns its address.
    ///
    /// # Errors
    ///
    /// - [`OrchestrationError::GasEstimationFailed`] / `SubmissionRejected`
    ///   from the signed call.
    /// - [`OrchestrationError::LedgerQueryError`] from the read-back.
    /// - [`OrchestrationError::PoolCreatedButUnresolved`] if the call
    ///   finalized but the registry still has no pair for `key`.
    pub async fn create_explicit_pair(
        &self,
        key: &PairKey,
        signer: &Signer,
    ) -> Result<Address, OrchestrationError> {
        const OPERATION: &str = "create_explicit_pair";

        let call = ContractCall::new("Service", "CreatePool")
            .arg(json!(key.token_a()))
            .arg(json!(key.token_b()));
        let reply =
            submit_signed(self.factory.as_ref(), &call, signer, self.call_value, OPERATION).await?;
        tracing::debug!(%reply, "create pool reply");

        self.resolver
            .resolve(key)
            .await?
            .ok_or(OrchestrationError::PoolCreatedButUnresolved {
                operation: OPERATION,
                token: key.token_a(),
                counterpart: Some(key.token_b()),
            })
    }

    /// Creates a pool pairing `token` with `registered_token`, or with the
    /// factory's default quote token when `None`, and returns its address.
    ///
    /// The address is the last entry of the pair registry after the
    /// settling delay. This relies on the registry being append-ordered;
    /// a concurrent creation by another client can make it pick the wrong
    /// pair, which is logged when the newest entry does not involve
    /// `token`.
    ///
    /// # Errors
    ///
    /// - [`OrchestrationError::GasEstimationFailed`] / `SubmissionRejected`
    ///   from the signed call.
    /// - [`OrchestrationError::LedgerQueryError`] from the enumeration.
    /// - [`OrchestrationError::PoolCreatedButUnresolved`] if the registry
    ///   is empty after creation.
    pub async fn create_with_registered_token(
        &self,
        token: Address,
        registered_token: Option<Address>,
        signer: &Signer,
    ) -> Result<Address, OrchestrationError> {
        const OPERATION: &str = "create_pool_with_registered_token";

        let call = ContractCall::new("Service", "CreatePoolWithRegisteredToken")
            .arg(json!(token))
            .arg(json!(registered_token));
        submit_signed(self.factory.as_ref(), &call, signer, self.call_value, OPERATION).await?;

        settle(self.post_pool_delay, "registered token pool").await;

        let pairs = self.resolver.list_all().await?;
        let newest = pairs
            .last()
            .ok_or(OrchestrationError::PoolCreatedButUnresolved {
                operation: OPERATION,
                token,
                counterpart: registered_token,
            })?;

        let expected_counterpart = registered_token.is_none_or(|r| newest.key.contains(r));
        if !newest.key.contains(token) || !expected_counterpart {
            tracing::warn!(
                %token,
                pair = %newest.pair_address,
                token_a = %newest.key.token_a(),
                token_b = %newest.key.token_b(),
                "newest registry entry does not match the requested pair"
            );
        }

        tracing::info!(%token, pair = %newest.pair_address, "pool created");
        Ok(newest.pair_address)
    }
}
