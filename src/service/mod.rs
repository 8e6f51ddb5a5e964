//! Service layer: orchestration of ledger writes and reads.
//!
//! [`LaunchService`] is the entry point used by the HTTP handlers. It
//! composes [`ProgramCreator`], [`PoolCreator`] and [`PairResolver`], adds
//! the idempotency guard in front of pool creation and sequences the
//! program-then-pool flow. [`FactoryQueries`] exposes the read-only
//! registry queries.

pub mod factory_queries;
pub mod launch_service;
pub mod pair_resolver;
pub mod pool_creator;
pub mod program_creator;
pub mod settle;

pub use factory_queries::FactoryQueries;
pub use launch_service::{LaunchOptions, LaunchService, PairCreation, ProgramAndPool};
pub use pair_resolver::PairResolver;
pub use pool_creator::PoolCreator;
pub use program_creator::{MintedProgram, ProgramCreator};
pub use settle::SettlingDelays;

use serde::de::DeserializeOwned;

use crate::domain::GasBudget;
use crate::error::OrchestrationError;
use crate::ledger::{ContractCall, LedgerClient, LedgerError, Signer, decode_reply};

/// Runs a read-only query and decodes its reply.
pub(crate) async fn query_as<T: DeserializeOwned>(
    client: &dyn LedgerClient,
    call: &ContractCall,
    operation: &'static str,
) -> Result<T, OrchestrationError> {
    client
        .query(call)
        .await
        .and_then(decode_reply::<T>)
        .map_err(|source| OrchestrationError::LedgerQueryError { operation, source })
}

/// Estimates gas, then signs, submits and waits for finalization.
///
/// Returns the raw decoded reply; interpreting it is up to the caller. A
/// submission that times out is reported as
/// [`OrchestrationError::SubmissionOutcomeUnknown`], never as a rejection.
pub(crate) async fn submit_signed(
    client: &dyn LedgerClient,
    call: &ContractCall,
    signer: &Signer,
    value: u128,
    operation: &'static str,
) -> Result<serde_json::Value, OrchestrationError> {
    let gas = client
        .estimate_gas(call, signer, value)
        .await
        .map_err(|source| OrchestrationError::GasEstimationFailed { operation, source })?;

    let budget = GasBudget::new(value, gas);
    tracing::info!(
        binding = client.binding().name(),
        %call,
        gas,
        value = %budget.value,
        "submitting signed call"
    );

    client
        .submit_call(call, signer, budget)
        .await
        .map_err(|source| match source {
            LedgerError::Timeout(_) => {
                tracing::warn!(%call, error = %source, "submission outcome unknown");
                OrchestrationError::SubmissionOutcomeUnknown { operation, source }
            }
            source => OrchestrationError::SubmissionRejected { operation, source },
        })
}
