//! Read-only queries against the program factory and the pool factory.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::pair_resolver::FACTORY_SERVICE;
use super::{PairResolver, query_as};
use crate::domain::{Address, CreatorRegistration, PairKey, PairRecord, ProgramIndexEntry};
use crate::error::OrchestrationError;
use crate::ledger::{ContractCall, LedgerClient};

const SERVICE: &str = "Service";

/// Registry and configuration lookups. Each method is a single query with
/// no side effects.
#[derive(Debug, Clone)]
pub struct FactoryQueries {
    factory: Arc<dyn LedgerClient>,
    pool_factory: Arc<dyn LedgerClient>,
    resolver: PairResolver,
}

impl FactoryQueries {
    /// Creates the query facade over both contract clients.
    #[must_use]
    pub fn new(factory: Arc<dyn LedgerClient>, pool_factory: Arc<dyn LedgerClient>) -> Self {
        let resolver = PairResolver::new(Arc::clone(&pool_factory));
        Self {
            factory,
            pool_factory,
            resolver,
        }
    }

    async fn factory_query<T: DeserializeOwned>(
        &self,
        function: &'static str,
        operation: &'static str,
    ) -> Result<T, OrchestrationError> {
        query_as(self.factory.as_ref(), &ContractCall::new(SERVICE, function), operation).await
    }

    async fn pool_factory_query<T: DeserializeOwned>(
        &self,
        function: &'static str,
        operation: &'static str,
    ) -> Result<T, OrchestrationError> {
        query_as(
            self.pool_factory.as_ref(),
            &ContractCall::new(FACTORY_SERVICE, function),
            operation,
        )
        .await
    }

    /// Accounts allowed to administer the program factory.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::LedgerQueryError`] on query or decode failure.
    pub async fn admins(&self) -> Result<Vec<Address>, OrchestrationError> {
        self.factory_query("Admins", "admins").await
    }

    /// Program id to address index.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::LedgerQueryError`] on query or decode failure.
    pub async fn id_to_address(&self) -> Result<Vec<ProgramIndexEntry>, OrchestrationError> {
        self.factory_query("IdToAddress", "id_to_address").await
    }

    /// Number of programs minted so far.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::LedgerQueryError`] on query or decode failure.
    pub async fn number(&self) -> Result<u64, OrchestrationError> {
        self.factory_query("Number", "number").await
    }

    /// Programs grouped by creator.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::LedgerQueryError`] on query or decode failure.
    pub async fn registry(&self) -> Result<Vec<CreatorRegistration>, OrchestrationError> {
        self.factory_query("Registry", "registry").await
    }

    /// Pool factory address configured in the program factory.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::LedgerQueryError`] on query or decode failure.
    pub async fn pool_factory_address(&self) -> Result<Address, OrchestrationError> {
        self.factory_query("PoolFactoryAddress", "pool_factory_address")
            .await
    }

    /// Pool address for `key`, `None` if the pair does not exist.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::LedgerQueryError`] on query or decode failure.
    pub async fn pair_address(&self, key: &PairKey) -> Result<Option<Address>, OrchestrationError> {
        self.resolver.resolve(key).await
    }

    /// Every pair in the pool factory registry.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::LedgerQueryError`] on query or decode failure.
    pub async fn all_pairs(&self) -> Result<Vec<PairRecord>, OrchestrationError> {
        self.resolver.list_all().await
    }

    /// Protocol fee recipient of the pool factory.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::LedgerQueryError`] on query or decode failure.
    pub async fn fee_to(&self) -> Result<Address, OrchestrationError> {
        self.pool_factory_query("FeeTo", "fee_to").await
    }

    /// Treasury account of the pool factory.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::LedgerQueryError`] on query or decode failure.
    pub async fn treasury_id(&self) -> Result<Address, OrchestrationError> {
        self.pool_factory_query("TreasuryId", "treasury_id").await
    }
}
