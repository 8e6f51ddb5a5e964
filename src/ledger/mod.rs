//! Ledger client capability.
//!
//! The orchestration core never talks to the chain directly. It goes through
//! a [`LedgerClient`] bound to exactly one contract (a [`ContractBinding`]),
//! which can estimate gas, submit a signed fee-bearing call and wait for its
//! finalized reply, or run a read-only query. Encoding, signing and
//! transport belong to the implementation; [`rpc::JsonRpcLedgerClient`]
//! delegates them to a JSON-RPC bridge.
//!
//! The process owns one client per binding and shares it read-only across
//! concurrent requests via `Arc<dyn LedgerClient>`.

pub mod rpc;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{Address, GasBudget};

/// Error raised by a [`LedgerClient`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The bridge could not be reached or the connection failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// No reply arrived within the client timeout. The request may still
    /// have reached the ledger.
    #[error("timed out waiting for the bridge: {0}")]
    Timeout(String),

    /// The bridge or the node rejected the request.
    #[error("ledger rpc error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message reported by the bridge.
        message: String,
    },

    /// The reply could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

/// A contract instance and the interface description used to encode calls
/// to it.
#[derive(Clone)]
pub struct ContractBinding {
    name: String,
    program_id: Address,
    idl: Arc<str>,
}

impl ContractBinding {
    /// Creates a binding.
    #[must_use]
    pub fn new(name: impl Into<String>, program_id: Address, idl: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            program_id,
            idl: idl.into(),
        }
    }

    /// Identifier of the binding (e.g. `"factory"`), used in logs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// On-chain program id of the contract.
    #[must_use]
    pub const fn program_id(&self) -> Address {
        self.program_id
    }

    /// Interface description (IDL) text.
    #[must_use]
    pub fn idl(&self) -> &str {
        &self.idl
    }
}

impl fmt::Debug for ContractBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractBinding")
            .field("name", &self.name)
            .field("program_id", &self.program_id)
            .field("idl_len", &self.idl.len())
            .finish()
    }
}

/// A contract function invocation: service, function and positional
/// arguments, already in their JSON form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractCall {
    /// Service name inside the contract (e.g. `"Service"`, `"Factory"`).
    pub service: &'static str,
    /// Function or query name.
    pub function: &'static str,
    /// Positional arguments.
    pub args: Vec<serde_json::Value>,
}

impl ContractCall {
    /// Creates a call with no arguments.
    #[must_use]
    pub const fn new(service: &'static str, function: &'static str) -> Self {
        Self {
            service,
            function,
            args: Vec::new(),
        }
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn arg(mut self, value: serde_json::Value) -> Self {
        self.args.push(value);
        self
    }
}

impl fmt::Display for ContractCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.service, self.function)
    }
}

/// Account that authorizes signed calls.
///
/// Keys never enter this process: the name refers to an account held in the
/// bridge's keyring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    account: String,
}

impl Signer {
    /// Creates a signer for the named keyring account.
    #[must_use]
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }

    /// Keyring account name.
    #[must_use]
    pub fn account(&self) -> &str {
        &self.account
    }
}

/// Capability to read from and write to one contract on the ledger.
#[async_trait]
pub trait LedgerClient: Send + Sync + fmt::Debug {
    /// The contract this client is bound to.
    fn binding(&self) -> &ContractBinding;

    /// Estimates the gas limit for `call` signed by `signer` with `value`
    /// attached, against current chain state.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the estimation cannot be performed.
    async fn estimate_gas(
        &self,
        call: &ContractCall,
        signer: &Signer,
        value: u128,
    ) -> Result<u64, LedgerError>;

    /// Signs and submits `call`, waiting until it is finalized, and returns
    /// the decoded reply.
    ///
    /// Once this is invoked the effect may happen even if the caller stops
    /// waiting.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the call is rejected or its reply cannot
    /// be obtained.
    async fn submit_call(
        &self,
        call: &ContractCall,
        signer: &Signer,
        budget: GasBudget,
    ) -> Result<serde_json::Value, LedgerError>;

    /// Runs a read-only query and returns its decoded value. No fee.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] on transport or decode failures.
    async fn query(&self, call: &ContractCall) -> Result<serde_json::Value, LedgerError>;
}

/// Decodes a ledger reply into `T`.
///
/// # Errors
///
/// Returns [`LedgerError::Decode`] if the value does not match `T`.
pub fn decode_reply<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, LedgerError> {
    serde_json::from_value(value).map_err(|e| LedgerError::Decode(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn call_display_and_args() {
        let call = ContractCall::new("Factory", "GetPair")
            .arg(serde_json::json!("0x01"))
            .arg(serde_json::json!("0x02"));
        assert_eq!(call.to_string(), "Factory.GetPair");
        assert_eq!(call.args.len(), 2);
    }

    #[test]
    fn binding_debug_hides_idl_text() {
        let binding = ContractBinding::new("factory", Address::ZERO, "service Service {}");
        let debug = format!("{binding:?}");
        assert!(debug.contains("idl_len"));
        assert!(!debug.contains("service Service"));
    }

    #[test]
    fn decode_reply_reports_shape_errors() {
        let ok: Result<u64, _> = decode_reply(serde_json::json!(5));
        assert_eq!(ok, Ok(5));
        let err: Result<u64, _> = decode_reply(serde_json::json!("five"));
        let Err(LedgerError::Decode(_)) = err else {
            panic!("expected decode error");
        };
    }
}
