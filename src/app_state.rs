//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::ledger::Signer;
use crate::service::{FactoryQueries, LaunchService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Program and pool orchestration.
    pub launch_service: Arc<LaunchService>,
    /// Read-only registry queries.
    pub queries: Arc<FactoryQueries>,
    /// Account every write is signed with.
    pub signer: Signer,
    /// API-key settings.
    pub auth: Arc<AuthConfig>,
    /// Ledger node endpoint reported by the health check.
    pub network: Arc<str>,
}
