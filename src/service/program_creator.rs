//! Minting token programs through the program factory.

use std::sync::Arc;

use serde_json::json;

use super::submit_signed;
use crate::domain::{Address, ProgramInitConfig, TransactionOutcome};
use crate::error::OrchestrationError;
use crate::ledger::{ContractCall, LedgerClient, Signer};

const OPERATION: &str = "create_program";

/// A finalized mint: the decoded outcome and the non-zero address it
/// carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintedProgram {
    /// Decoded `programCreated` outcome.
    pub outcome: TransactionOutcome,
    /// Address of the minted program.
    pub address: Address,
}

/// Submits `CreateProgram` calls to the program factory.
#[derive(Debug, Clone)]
pub struct ProgramCreator {
    factory: Arc<dyn LedgerClient>,
    call_value: u128,
}

impl ProgramCreator {
    /// Creates a program creator attaching `call_value` to every call.
    #[must_use]
    pub fn new(factory: Arc<dyn LedgerClient>, call_value: u128) -> Self {
        Self {
            factory,
            call_value,
        }
    }

    /// Mints a new token program.
    ///
    /// `config` was validated when it was built and is not re-checked.
    /// The mint is irreversible once finalized.
    ///
    /// # Errors
    ///
    /// - [`OrchestrationError::GasEstimationFailed`], `SubmissionRejected`
    ///   or `SubmissionOutcomeUnknown` from the signed call.
    /// - [`OrchestrationError::UnexpectedOutcome`] if the reply does not
    ///   decode to a `programCreated` outcome.
    /// - [`OrchestrationError::MissingProgramAddress`] if that outcome
    ///   carries the zero address.
    pub async fn create(
        &self,
        config: &ProgramInitConfig,
        signer: &Signer,
    ) -> Result<MintedProgram, OrchestrationError> {
        let call = ContractCall::new("Service", "CreateProgram").arg(json!(config));
        let reply =
            submit_signed(self.factory.as_ref(), &call, signer, self.call_value, OPERATION).await?;

        let outcome =
            TransactionOutcome::decode(reply).map_err(|actual| {
                OrchestrationError::UnexpectedOutcome {
                    operation: OPERATION,
                    expected: "programCreated",
                    actual,
                }
            })?;

        if !matches!(outcome, TransactionOutcome::ProgramCreated { .. }) {
            return Err(OrchestrationError::UnexpectedOutcome {
                operation: OPERATION,
                expected: "programCreated",
                actual: outcome.discriminant().to_string(),
            });
        }
        let address = outcome.program_address().ok_or_else(|| {
            OrchestrationError::MissingProgramAddress {
                operation: OPERATION,
                discriminant: outcome.discriminant(),
                symbol: config.symbol().to_string(),
            }
        })?;

        tracing::info!(%address, symbol = config.symbol(), "program created");
        Ok(MintedProgram { outcome, address })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Address, MintAmount, ONE_VARA};
    use crate::ledger::LedgerError;
    use crate::ledger::testing::FakeChain;

    fn config() -> ProgramInitConfig {
        let admin = Address::from_bytes([1u8; 32]);
        let Ok(amount) = "1000000000000000000000".parse::<MintAmount>() else {
            panic!("valid amount");
        };
        let Ok(cfg) = ProgramInitConfig::new("Token Alpha", "alpha", 18, vec![admin], amount, admin)
        else {
            panic!("valid config");
        };
        cfg
    }

    fn creator(chain: &FakeChain) -> ProgramCreator {
        ProgramCreator::new(chain.program_factory(), ONE_VARA)
    }

    #[tokio::test]
    async fn returns_program_created_with_valid_address() {
        let chain = FakeChain::new();
        let result = creator(&chain).create(&config(), &Signer::new("deployer")).await;

        let Ok(MintedProgram { outcome, address }) = result else {
            panic!("creation failed: {result:?}");
        };
        assert_eq!(outcome.discriminant(), "programCreated");
        assert!(!address.is_zero());
        assert_eq!(outcome.program_address(), Some(address));
        let TransactionOutcome::ProgramCreated { init_config, .. } = outcome else {
            panic!("program created");
        };
        assert_eq!(init_config.symbol(), "ALPHA");
        assert_eq!(chain.submits().await, vec!["CreateProgram"]);
    }

    #[tokio::test]
    async fn other_discriminant_is_unexpected() {
        let chain = FakeChain::new();
        let admin = Address::from_bytes([1u8; 32]).to_string();
        chain
            .configure(|s| {
                s.program_reply = Some(json!({
                    "adminAdded": {"updated_by": admin, "admin_actor_id": admin}
                }));
            })
            .await;

        let result = creator(&chain).create(&config(), &Signer::new("deployer")).await;
        let Err(OrchestrationError::UnexpectedOutcome { actual, .. }) = result else {
            panic!("expected unexpected outcome, got {result:?}");
        };
        assert_eq!(actual, "adminAdded");
    }

    #[tokio::test]
    async fn malformed_reply_is_unexpected() {
        let chain = FakeChain::new();
        chain
            .configure(|s| s.program_reply = Some(json!({"programCreated": {"id": 1}})))
            .await;

        let result = creator(&chain).create(&config(), &Signer::new("deployer")).await;
        let Err(OrchestrationError::UnexpectedOutcome { .. }) = result else {
            panic!("expected unexpected outcome, got {result:?}");
        };
    }

    #[tokio::test]
    async fn zero_address_is_missing_program_address() {
        let chain = FakeChain::new();
        let zero = Address::ZERO.to_string();
        let one = Address::from_bytes([1u8; 32]).to_string();
        chain
            .configure(|s| {
                s.program_reply = Some(json!({"programCreated": {
                    "id": 1,
                    "address": zero,
                    "init_config": {
                        "name": "n", "symbol": "S", "decimals": 0,
                        "admins": [one], "mint_amount": "0", "mint_to": one
                    }
                }}));
            })
            .await;

        let result = creator(&chain).create(&config(), &Signer::new("deployer")).await;
        assert_eq!(
            result,
            Err(OrchestrationError::MissingProgramAddress {
                operation: "create_program",
                discriminant: "programCreated",
                symbol: "ALPHA".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn gas_estimation_failure_skips_submission() {
        let chain = FakeChain::new();
        chain.configure(|s| s.fail_estimate = true).await;

        let result = creator(&chain).create(&config(), &Signer::new("deployer")).await;
        let Err(OrchestrationError::GasEstimationFailed { .. }) = result else {
            panic!("expected gas estimation failure, got {result:?}");
        };
        assert_eq!(chain.submit_count().await, 0);
    }

    #[tokio::test]
    async fn rejected_submission() {
        let chain = FakeChain::new();
        chain.configure(|s| s.fail_submit = true).await;

        let result = creator(&chain).create(&config(), &Signer::new("deployer")).await;
        let Err(OrchestrationError::SubmissionRejected { operation, .. }) = result else {
            panic!("expected rejection, got {result:?}");
        };
        assert_eq!(operation, "create_program");
    }

    #[tokio::test]
    async fn timed_out_submission_is_outcome_unknown() {
        let chain = FakeChain::new();
        chain.configure(|s| s.timeout_submit = Some("CreateProgram")).await;

        let result = creator(&chain).create(&config(), &Signer::new("deployer")).await;
        let Err(OrchestrationError::SubmissionOutcomeUnknown { operation, source }) = result
        else {
            panic!("expected unknown outcome, got {result:?}");
        };
        assert_eq!(operation, "create_program");
        let LedgerError::Timeout(_) = source else {
            panic!("expected timeout source, got {source:?}");
        };
    }
}
