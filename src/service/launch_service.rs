//! Launch service: idempotent pool creation and the program-then-pool flow.

use std::sync::Arc;

use serde::Serialize;
use tracing::Instrument;

use super::settle::settle;
use super::{MintedProgram, PairResolver, PoolCreator, ProgramCreator, SettlingDelays};
use crate::domain::{Address, ONE_VARA, PairKey, ProgramInitConfig, TransactionOutcome};
use crate::error::OrchestrationError;
use crate::ledger::{LedgerClient, Signer};

/// Default quote token paired with freshly minted programs.
pub const DEFAULT_REGISTERED_TOKEN: Address = Address::from_bytes([
    0xd0, 0xf8, 0x9c, 0xfd, 0x99, 0x4c, 0x92, 0xbb, 0x74, 0x3a, 0x5a, 0x69, 0x04, 0x96, 0x09, 0xb7,
    0x96, 0xe2, 0x02, 0x6e, 0x05, 0x31, 0x8f, 0x7e, 0xef, 0x62, 0x1a, 0x5e, 0x31, 0xdf, 0x3d, 0x4b,
]);

/// Tunables of the launch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Native value attached to every signed call.
    pub call_value: u128,
    /// Settling delays between dependent steps.
    pub delays: SettlingDelays,
    /// Quote token used by [`LaunchService::create_program_and_pool`] when
    /// the caller supplies none.
    pub default_registered_token: Address,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            call_value: ONE_VARA,
            delays: SettlingDelays::default(),
            default_registered_token: DEFAULT_REGISTERED_TOKEN,
        }
    }
}

/// Result of a guarded pool creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairCreation {
    /// A pool was created by this request.
    Created(Address),
    /// The pool already existed; no transaction was submitted.
    AlreadyExists(Address),
}

impl PairCreation {
    /// Pool address, whichever way it was obtained.
    #[must_use]
    pub const fn address(&self) -> Address {
        match self {
            Self::Created(a) | Self::AlreadyExists(a) => *a,
        }
    }

    /// `true` if no transaction was submitted.
    #[must_use]
    pub const fn already_existed(&self) -> bool {
        matches!(self, Self::AlreadyExists(_))
    }
}

/// Result of [`LaunchService::create_program_and_pool`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramAndPool {
    /// `programCreated` outcome of the mint.
    pub program: TransactionOutcome,
    /// Address of the minted program.
    pub program_address: Address,
    /// Address of the pool created for it.
    pub pair_address: Address,
    /// Quote token requested for the pool.
    pub registered_token: Address,
}

/// Orchestrates program minting and pool creation against the two
/// factories.
///
/// Stateless between requests: the ledger clients are shared read-only and
/// every operation runs as its own strictly sequential chain of calls, so
/// any number of requests can run concurrently.
#[derive(Debug, Clone)]
pub struct LaunchService {
    programs: ProgramCreator,
    pools: PoolCreator,
    resolver: PairResolver,
    options: LaunchOptions,
}

impl LaunchService {
    /// Creates the service from the two contract clients.
    #[must_use]
    pub fn new(
        program_factory: Arc<dyn LedgerClient>,
        pool_factory: Arc<dyn LedgerClient>,
        options: LaunchOptions,
    ) -> Self {
        let resolver = PairResolver::new(pool_factory);
        Self {
            programs: ProgramCreator::new(Arc::clone(&program_factory), options.call_value),
            pools: PoolCreator::new(
                program_factory,
                resolver.clone(),
                options.call_value,
                options.delays.post_pool,
            ),
            resolver,
            options,
        }
    }

    /// Pair resolver over the pool factory registry.
    #[must_use]
    pub const fn resolver(&self) -> &PairResolver {
        &self.resolver
    }

    /// Options the service was built with.
    #[must_use]
    pub const fn options(&self) -> &LaunchOptions {
        &self.options
    }

    /// Mints a token program.
    ///
    /// # Errors
    ///
    /// Propagates [`ProgramCreator::create`] failures.
    pub async fn create_program(
        &self,
        config: &ProgramInitConfig,
        signer: &Signer,
    ) -> Result<TransactionOutcome, OrchestrationError> {
        self.programs
            .create(config, signer)
            .instrument(operation_span("create_program"))
            .await
            .map(|minted| minted.outcome)
    }

    /// Creates a pool for `key` unless the registry already has one.
    ///
    /// Calling this twice with the same tokens, in either order, returns
    /// the same address and submits at most one transaction.
    ///
    /// # Errors
    ///
    /// Propagates [`PairResolver::resolve`] and
    /// [`PoolCreator::create_explicit_pair`] failures.
    pub async fn create_pool(
        &self,
        key: PairKey,
        signer: &Signer,
    ) -> Result<PairCreation, OrchestrationError> {
        async {
            if let Some(existing) = self.resolver.resolve(&key).await? {
                tracing::info!(pair = %existing, "pool already exists");
                return Ok(PairCreation::AlreadyExists(existing));
            }
            let created = self.pools.create_explicit_pair(&key, signer).await?;
            Ok::<_, OrchestrationError>(PairCreation::Created(created))
        }
        .instrument(operation_span("create_pool"))
        .await
    }

    /// Creates a pool pairing `token` with `registered_token` (or the
    /// factory's default quote when `None`).
    ///
    /// The existence check only runs when `registered_token` is given,
    /// since otherwise the counterpart is decided by the contract.
    ///
    /// # Errors
    ///
    /// Propagates [`PairResolver::resolve`] and
    /// [`PoolCreator::create_with_registered_token`] failures.
    pub async fn create_pool_with_registered_token(
        &self,
        token: Address,
        registered_token: Option<Address>,
        signer: &Signer,
    ) -> Result<PairCreation, OrchestrationError> {
        async {
            if let Some(existing) = self.existing_pair(token, registered_token).await? {
                tracing::info!(pair = %existing, "pool already exists");
                return Ok(PairCreation::AlreadyExists(existing));
            }
            let created = self
                .pools
                .create_with_registered_token(token, registered_token, signer)
                .await?;
            Ok::<_, OrchestrationError>(PairCreation::Created(created))
        }
        .instrument(operation_span("create_pool_with_registered_token"))
        .await
    }

    /// Mints a program, waits for it to settle, then pairs it with
    /// `registered_token` (or the configured default).
    ///
    /// Nothing is rolled back: if the pool step fails the program stays
    /// minted and the error carries its address so pool creation can be
    /// resumed.
    ///
    /// # Errors
    ///
    /// - Any [`ProgramCreator::create`] failure, unchanged.
    /// - [`OrchestrationError::ProgramMintedButPoolFailed`] wrapping the
    ///   pool step's failure.
    pub async fn create_program_and_pool(
        &self,
        config: &ProgramInitConfig,
        registered_token: Option<Address>,
        signer: &Signer,
    ) -> Result<ProgramAndPool, OrchestrationError> {
        let registered_token = registered_token.unwrap_or(self.options.default_registered_token);

        async {
            let MintedProgram {
                outcome: program,
                address: program_address,
            } = self.programs.create(config, signer).await?;

            settle(self.options.delays.post_mint, "program mint").await;

            let pair_address = self
                .pools
                .create_with_registered_token(program_address, Some(registered_token), signer)
                .await
                .map_err(|source| {
                    tracing::error!(
                        %program_address,
                        error = %source,
                        "program minted but pool creation failed"
                    );
                    OrchestrationError::ProgramMintedButPoolFailed {
                        program_address,
                        source: Box::new(source),
                    }
                })?;

            Ok::<_, OrchestrationError>(ProgramAndPool {
                program,
                program_address,
                pair_address,
                registered_token,
            })
        }
        .instrument(operation_span("create_program_and_pool"))
        .await
    }

    async fn existing_pair(
        &self,
        token: Address,
        registered_token: Option<Address>,
    ) -> Result<Option<Address>, OrchestrationError> {
        let Some(registered) = registered_token else {
            return Ok(None);
        };
        // Identical tokens cannot form a pair; the factory rejects the call.
        let Ok(key) = PairKey::new(token, registered) else {
            return Ok(None);
        };
        self.resolver.resolve(&key).await
    }
}

fn operation_span(operation: &'static str) -> tracing::Span {
    tracing::info_span!("operation", name = operation, operation_id = %uuid::Uuid::new_v4())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::MintAmount;
    use crate::ledger::testing::{FAKE_DEFAULT_QUOTE, FakeChain};

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    fn key(a: u8, b: u8) -> PairKey {
        let Ok(k) = PairKey::new(addr(a), addr(b)) else {
            panic!("distinct tokens");
        };
        k
    }

    fn signer() -> Signer {
        Signer::new("deployer")
    }

    fn service(chain: &FakeChain) -> LaunchService {
        service_with_delays(chain, SettlingDelays::NONE)
    }

    fn service_with_delays(chain: &FakeChain, delays: SettlingDelays) -> LaunchService {
        LaunchService::new(
            chain.program_factory(),
            chain.pool_factory(),
            LaunchOptions {
                delays,
                ..LaunchOptions::default()
            },
        )
    }

    fn config() -> ProgramInitConfig {
        let admin = addr(1);
        let Ok(amount) = "5000".parse::<MintAmount>() else {
            panic!("valid amount");
        };
        let Ok(cfg) = ProgramInitConfig::new("Token Alpha", "alpha", 12, vec![admin], amount, admin)
        else {
            panic!("valid config");
        };
        cfg
    }

    #[test]
    fn default_registered_token_matches_documented_value() {
        assert_eq!(
            DEFAULT_REGISTERED_TOKEN.to_string(),
            "0xd0f89cfd994c92bb743a5a69049609b796e2026e05318f7eef621a5e31df3d4b"
        );
    }

    #[tokio::test]
    async fn create_pool_is_idempotent() {
        let chain = FakeChain::new();
        let service = service(&chain);

        let first = service.create_pool(key(0xaa, 0xbb), &signer()).await;
        let Ok(PairCreation::Created(address)) = first else {
            panic!("expected creation, got {first:?}");
        };
        assert_eq!(chain.submit_count().await, 1);
        // one pre-check plus one post-check
        assert_eq!(chain.query_count("GetPair").await, 2);

        let second = service.create_pool(key(0xaa, 0xbb), &signer()).await;
        assert_eq!(second, Ok(PairCreation::AlreadyExists(address)));
        assert_eq!(chain.submit_count().await, 1);

        let reversed = service.create_pool(key(0xbb, 0xaa), &signer()).await;
        assert_eq!(reversed, Ok(PairCreation::AlreadyExists(address)));
        assert_eq!(chain.submit_count().await, 1);
    }

    #[tokio::test]
    async fn registered_token_guard_only_with_explicit_counterpart() {
        let chain = FakeChain::new();
        chain.seed_pair(addr(0xaa), addr(0xbb), addr(0x99)).await;
        let service = service(&chain);

        let guarded = service
            .create_pool_with_registered_token(addr(0xaa), Some(addr(0xbb)), &signer())
            .await;
        assert_eq!(guarded, Ok(PairCreation::AlreadyExists(addr(0x99))));
        assert_eq!(chain.submit_count().await, 0);

        let unguarded = service
            .create_pool_with_registered_token(addr(0xaa), None, &signer())
            .await;
        let Ok(PairCreation::Created(pair)) = unguarded else {
            panic!("expected creation, got {unguarded:?}");
        };
        assert_ne!(pair, addr(0x99));
        assert_eq!(chain.submits().await, vec!["CreatePoolWithRegisteredToken"]);
    }

    #[tokio::test]
    async fn program_and_pool_returns_both_addresses() {
        let chain = FakeChain::new();
        let service = service(&chain);

        let result = service
            .create_program_and_pool(&config(), None, &signer())
            .await;
        let Ok(created) = result else {
            panic!("expected success, got {result:?}");
        };
        assert!(!created.program_address.is_zero());
        assert!(!created.pair_address.is_zero());
        assert_eq!(created.registered_token, DEFAULT_REGISTERED_TOKEN);
        assert_eq!(
            chain.submits().await,
            vec!["CreateProgram", "CreatePoolWithRegisteredToken"]
        );

        let Ok(records) = service.resolver().list_all().await else {
            panic!("list succeeds");
        };
        let Some(last) = records.last() else {
            panic!("pair registered");
        };
        assert!(last.key.contains(created.program_address));
        assert!(last.key.contains(DEFAULT_REGISTERED_TOKEN));
        assert!(!last.key.contains(FAKE_DEFAULT_QUOTE));
    }

    #[tokio::test]
    async fn program_and_pool_failure_keeps_program_address() {
        let chain = FakeChain::new();
        chain.configure(|s| s.drop_pair_writes = true).await;
        let service = service(&chain);

        let result = service
            .create_program_and_pool(&config(), Some(addr(0xee)), &signer())
            .await;
        let Err(err) = result else {
            panic!("expected failure");
        };
        let Some(program_address) = err.recoverable_program_address() else {
            panic!("program address recoverable from {err:?}");
        };
        assert!(!program_address.is_zero());
        let OrchestrationError::PoolCreatedButUnresolved { token, .. } = err.root() else {
            panic!("expected unresolved pool, got {err:?}");
        };
        assert_eq!(*token, program_address);
    }

    #[tokio::test]
    async fn program_failure_stops_before_pool() {
        let chain = FakeChain::new();
        chain.configure(|s| s.fail_submit = true).await;
        let service = service(&chain);

        let result = service
            .create_program_and_pool(&config(), None, &signer())
            .await;
        let Err(OrchestrationError::SubmissionRejected { operation, .. }) = result else {
            panic!("expected rejection, got {result:?}");
        };
        assert_eq!(operation, "create_program");
        assert_eq!(chain.submits().await, vec!["CreateProgram"]);
        assert_eq!(chain.query_count("Pairs").await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn program_and_pool_settles_after_mint_and_after_pool() {
        let chain = FakeChain::new();
        let delays = SettlingDelays {
            post_mint: Duration::from_secs(2),
            post_pool: Duration::from_secs(3),
        };
        let service = service_with_delays(&chain, delays);
        let started = tokio::time::Instant::now();

        let result = service
            .create_program_and_pool(&config(), Some(addr(0xee)), &signer())
            .await;
        let Ok(_) = result else {
            panic!("expected success, got {result:?}");
        };
        assert!(started.elapsed() >= delays.post_mint + delays.post_pool);

        let timeline = chain.timeline().await;
        let [
            ("CreateProgram", minted),
            ("CreatePoolWithRegisteredToken", pooled),
            ("Pairs", listed),
        ] = timeline.as_slice()
        else {
            panic!("unexpected call sequence: {timeline:?}");
        };
        assert!(pooled.duration_since(*minted) >= delays.post_mint);
        assert!(listed.duration_since(*pooled) >= delays.post_pool);
    }

    #[tokio::test]
    async fn timed_out_pool_step_is_unknown_outcome_with_program_address() {
        let chain = FakeChain::new();
        chain
            .configure(|s| s.timeout_submit = Some("CreatePoolWithRegisteredToken"))
            .await;
        let service = service(&chain);

        let result = service
            .create_program_and_pool(&config(), None, &signer())
            .await;
        let Err(err) = result else {
            panic!("expected failure");
        };
        let Some(program_address) = err.recoverable_program_address() else {
            panic!("program address recoverable from {err:?}");
        };
        let OrchestrationError::SubmissionOutcomeUnknown { operation, .. } = err.root() else {
            panic!("expected unknown outcome, got {err:?}");
        };
        assert_eq!(*operation, "create_pool_with_registered_token");
        assert_eq!(chain.query_count("Pairs").await, 0);

        // the pool exists even though the caller never saw a reply
        let pair = service
            .create_pool_with_registered_token(
                program_address,
                Some(DEFAULT_REGISTERED_TOKEN),
                &signer(),
            )
            .await;
        let Ok(PairCreation::AlreadyExists(_)) = pair else {
            panic!("expected existing pool, got {pair:?}");
        };
    }
}
