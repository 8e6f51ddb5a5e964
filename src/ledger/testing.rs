//! Scripted in-memory ledger for service and handler tests.
//!
//! [`FakeChain`] simulates the program factory and the pool factory sharing
//! one pair registry, and records every call so tests can assert on how
//! many writes and queries an operation issued.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::{ContractBinding, ContractCall, LedgerClient, LedgerError, Signer};
use crate::domain::{Address, GasBudget, PairKey, PairRecord};

/// Default quote token the fake factory substitutes.
pub(crate) const FAKE_DEFAULT_QUOTE: Address = Address::from_bytes([0xd0; 32]);

#[derive(Debug, Default)]
pub(crate) struct FakeState {
    pub pairs: Vec<PairRecord>,
    pub programs: u8,
    pub submits: Vec<&'static str>,
    pub queries: Vec<&'static str>,
    /// Every submit and query with the (tokio) time it was received.
    pub timeline: Vec<(&'static str, Instant)>,
    pub estimates: usize,
    pub fail_estimate: bool,
    pub fail_submit: bool,
    /// Submissions of this function take effect but the caller sees a
    /// timeout.
    pub timeout_submit: Option<&'static str>,
    pub fail_query: bool,
    /// `GetPair` reports the zero address even for existing pairs.
    pub get_pair_lags: bool,
    /// Pool creation calls succeed but register nothing.
    pub drop_pair_writes: bool,
    /// Replaces the `CreateProgram` reply.
    pub program_reply: Option<Value>,
}

/// Shared fake ledger; hand out per-binding clients with
/// [`FakeChain::program_factory`] and [`FakeChain::pool_factory`].
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeChain {
    state: Arc<Mutex<FakeState>>,
}

impl FakeChain {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn program_factory(&self) -> Arc<dyn LedgerClient> {
        Arc::new(FakeClient {
            binding: ContractBinding::new("factory", Address::from_bytes([0xfa; 32]), ""),
            state: Arc::clone(&self.state),
        })
    }

    pub(crate) fn pool_factory(&self) -> Arc<dyn LedgerClient> {
        Arc::new(FakeClient {
            binding: ContractBinding::new("pool_factory", Address::from_bytes([0xfb; 32]), ""),
            state: Arc::clone(&self.state),
        })
    }

    pub(crate) async fn configure(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut *self.state.lock().await);
    }

    pub(crate) async fn submit_count(&self) -> usize {
        self.state.lock().await.submits.len()
    }

    pub(crate) async fn submits(&self) -> Vec<&'static str> {
        self.state.lock().await.submits.clone()
    }

    pub(crate) async fn query_count(&self, function: &str) -> usize {
        self.state
            .lock()
            .await
            .queries
            .iter()
            .filter(|q| **q == function)
            .count()
    }

    pub(crate) async fn timeline(&self) -> Vec<(&'static str, Instant)> {
        self.state.lock().await.timeline.clone()
    }

    pub(crate) async fn seed_pair(&self, a: Address, b: Address, pair: Address) {
        if let Ok(key) = PairKey::new(a, b) {
            self.state.lock().await.pairs.push(PairRecord {
                key,
                pair_address: pair,
            });
        }
    }
}

#[derive(Debug)]
struct FakeClient {
    binding: ContractBinding,
    state: Arc<Mutex<FakeState>>,
}

fn arg_address(call: &ContractCall, index: usize) -> Result<Option<Address>, LedgerError> {
    match call.args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => serde_json::from_value(v.clone())
            .map(Some)
            .map_err(|e| LedgerError::Decode(e.to_string())),
    }
}

fn required_address(call: &ContractCall, index: usize) -> Result<Address, LedgerError> {
    arg_address(call, index)?
        .ok_or_else(|| LedgerError::Decode(format!("{call}: missing argument {index}")))
}

impl FakeState {
    fn next_pair_address(&self) -> Address {
        let mut bytes = [0x9a; 32];
        bytes[31] = u8::try_from(self.pairs.len() + 1).unwrap_or(u8::MAX);
        Address::from_bytes(bytes)
    }

    fn register_pair(&mut self, a: Address, b: Address) -> Result<Address, LedgerError> {
        let key = PairKey::new(a, b).map_err(|e| LedgerError::Rpc {
            code: 1,
            message: e.to_string(),
        })?;
        if let Some(existing) = self.pairs.iter().find(|r| r.key == key) {
            return Err(LedgerError::Rpc {
                code: 2,
                message: format!("pair exists at {}", existing.pair_address),
            });
        }
        let pair_address = self.next_pair_address();
        if !self.drop_pair_writes {
            self.pairs.push(PairRecord { key, pair_address });
        }
        Ok(pair_address)
    }

    fn apply_submit(&mut self, call: &ContractCall) -> Result<Value, LedgerError> {
        match call.function {
            "CreateProgram" => {
                if let Some(reply) = self.program_reply.clone() {
                    return Ok(reply);
                }
                self.programs += 1;
                let mut bytes = [0xc0; 32];
                bytes[31] = self.programs;
                let init_config = call.args.first().cloned().unwrap_or(Value::Null);
                Ok(json!({
                    "programCreated": {
                        "id": self.programs,
                        "address": Address::from_bytes(bytes).to_string(),
                        "init_config": init_config,
                    }
                }))
            }
            "CreatePool" => {
                let a = required_address(call, 0)?;
                let b = required_address(call, 1)?;
                let pair = self.register_pair(a, b)?;
                Ok(json!(pair.to_string()))
            }
            "CreatePoolWithRegisteredToken" => {
                let token = required_address(call, 0)?;
                let quote = arg_address(call, 1)?.unwrap_or(FAKE_DEFAULT_QUOTE);
                let pair = self.register_pair(token, quote)?;
                Ok(json!(pair.to_string()))
            }
            other => Err(LedgerError::Rpc {
                code: -32601,
                message: format!("unknown function {other}"),
            }),
        }
    }
}

#[async_trait]
impl LedgerClient for FakeClient {
    fn binding(&self) -> &ContractBinding {
        &self.binding
    }

    async fn estimate_gas(
        &self,
        _call: &ContractCall,
        _signer: &Signer,
        _value: u128,
    ) -> Result<u64, LedgerError> {
        let mut state = self.state.lock().await;
        state.estimates += 1;
        if state.fail_estimate {
            return Err(LedgerError::Rpc {
                code: -32000,
                message: "gas estimation reverted".to_string(),
            });
        }
        Ok(100_000_000)
    }

    async fn submit_call(
        &self,
        call: &ContractCall,
        _signer: &Signer,
        _budget: GasBudget,
    ) -> Result<Value, LedgerError> {
        let mut state = self.state.lock().await;
        state.submits.push(call.function);
        state.timeline.push((call.function, Instant::now()));
        if state.fail_submit {
            return Err(LedgerError::Rpc {
                code: 1010,
                message: "inability to pay some fees".to_string(),
            });
        }
        let reply = state.apply_submit(call)?;
        if state.timeout_submit == Some(call.function) {
            return Err(LedgerError::Timeout("operation timed out".to_string()));
        }
        Ok(reply)
    }

    async fn query(&self, call: &ContractCall) -> Result<Value, LedgerError> {
        let mut state = self.state.lock().await;
        state.queries.push(call.function);
        state.timeline.push((call.function, Instant::now()));
        if state.fail_query {
            return Err(LedgerError::Transport("connection refused".to_string()));
        }
        let admin = Address::from_bytes([0x01; 32]).to_string();
        match call.function {
            "GetPair" => {
                let key = PairKey::new(required_address(call, 0)?, required_address(call, 1)?)
                    .map_err(|e| LedgerError::Decode(e.to_string()))?;
                let found = state
                    .pairs
                    .iter()
                    .find(|r| r.key == key)
                    .map(|r| r.pair_address)
                    .filter(|_| !state.get_pair_lags)
                    .unwrap_or(Address::ZERO);
                Ok(json!(found.to_string()))
            }
            "Pairs" => Ok(Value::Array(
                state
                    .pairs
                    .iter()
                    .map(|r| {
                        json!([
                            [r.key.token_a().to_string(), r.key.token_b().to_string()],
                            r.pair_address.to_string()
                        ])
                    })
                    .collect(),
            )),
            "Admins" => Ok(json!([admin])),
            "Number" => Ok(json!(state.programs)),
            "IdToAddress" => Ok(json!([[1, Address::from_bytes([0xc0; 32]).to_string()]])),
            "Registry" => Ok(json!([])),
            "PoolFactoryAddress" => Ok(json!(Address::from_bytes([0xfb; 32]).to_string())),
            "FeeTo" => Ok(json!(Address::from_bytes([0xfe; 32]).to_string())),
            "TreasuryId" => Ok(json!(Address::from_bytes([0x7e; 32]).to_string())),
            other => Err(LedgerError::Rpc {
                code: -32601,
                message: format!("unknown query {other}"),
            }),
        }
    }
}
