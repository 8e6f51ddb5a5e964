//! JSON-RPC ledger client.
//!
//! [`JsonRpcLedgerClient`] talks JSON-RPC 2.0 over HTTP to a bridge process
//! that owns the node connection, the keyring and the IDL codec. Every
//! request carries the binding's program id and IDL, so one bridge can
//! serve any number of bindings.
//!
//! | Method               | Result                                   |
//! |----------------------|------------------------------------------|
//! | `sails_calculateGas` | `{"gasLimit": u64}`                      |
//! | `sails_signAndSend`  | `{"txHash", "blockHash", "reply"}`       |
//! | `sails_query`        | decoded query value                      |

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{ContractBinding, ContractCall, LedgerClient, LedgerError, Signer};
use crate::domain::GasBudget;

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: CallParams<'a>,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CallParams<'a> {
    program_id: String,
    idl: &'a str,
    service: &'static str,
    function: &'static str,
    args: &'a [serde_json::Value],
    #[serde(skip_serializing_if = "Option::is_none")]
    account: Option<&'a str>,
    /// u128 does not fit a JSON number safely; sent as a decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gas_limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GasEstimate {
    gas_limit: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitReceipt {
    tx_hash: String,
    block_hash: String,
    #[serde(default)]
    reply: serde_json::Value,
}

/// [`LedgerClient`] backed by a JSON-RPC bridge.
#[derive(Debug)]
pub struct JsonRpcLedgerClient {
    client: Client,
    endpoint: String,
    binding: ContractBinding,
    next_id: AtomicU64,
}

impl JsonRpcLedgerClient {
    /// Creates a client for `binding`, sending requests to `endpoint`.
    ///
    /// `timeout` bounds each HTTP round trip, including waiting for
    /// finalization on submissions.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        binding: ContractBinding,
        timeout: Duration,
    ) -> Result<Self, LedgerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Transport(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            binding,
            next_id: AtomicU64::new(1),
        })
    }

    fn params<'a>(&'a self, call: &'a ContractCall) -> CallParams<'a> {
        CallParams {
            program_id: self.binding.program_id().to_string(),
            idl: self.binding.idl(),
            service: call.service,
            function: call.function,
            args: &call.args,
            account: None,
            value: None,
            gas_limit: None,
        }
    }

    async fn rpc<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: CallParams<'_>,
    ) -> Result<T, LedgerError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::Transport(format!(
                "bridge returned http {status}"
            )));
        }

        let body: JsonRpcResponse<T> = response
            .json()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LedgerError::Timeout(e.to_string())
                } else {
                    LedgerError::Decode(e.to_string())
                }
            })?;

        if let Some(error) = body.error {
            return Err(LedgerError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        body.result
            .ok_or_else(|| LedgerError::Decode(format!("{method}: response has no result")))
    }
}

fn transport_error(e: &reqwest::Error) -> LedgerError {
    if e.is_timeout() {
        LedgerError::Timeout(e.to_string())
    } else {
        LedgerError::Transport(e.to_string())
    }
}

#[async_trait]
impl LedgerClient for JsonRpcLedgerClient {
    fn binding(&self) -> &ContractBinding {
        &self.binding
    }

    async fn estimate_gas(
        &self,
        call: &ContractCall,
        signer: &Signer,
        value: u128,
    ) -> Result<u64, LedgerError> {
        let params = CallParams {
            account: Some(signer.account()),
            value: Some(value.to_string()),
            ..self.params(call)
        };
        let estimate: GasEstimate = self.rpc("sails_calculateGas", params).await?;
        tracing::debug!(binding = self.binding.name(), %call, gas = estimate.gas_limit, "gas estimated");
        Ok(estimate.gas_limit)
    }

    async fn submit_call(
        &self,
        call: &ContractCall,
        signer: &Signer,
        budget: GasBudget,
    ) -> Result<serde_json::Value, LedgerError> {
        let params = CallParams {
            account: Some(signer.account()),
            value: Some(budget.value.to_string()),
            gas_limit: Some(budget.gas),
            ..self.params(call)
        };
        let receipt: SubmitReceipt = self.rpc("sails_signAndSend", params).await?;
        tracing::info!(
            binding = self.binding.name(),
            %call,
            tx_hash = %receipt.tx_hash,
            block_hash = %receipt.block_hash,
            "transaction finalized"
        );
        Ok(receipt.reply)
    }

    async fn query(&self, call: &ContractCall) -> Result<serde_json::Value, LedgerError> {
        self.rpc("sails_query", self.params(call)).await
    }
}
