//! launchpad-gateway server entry point.
//!
//! Connects to the ledger bridge and starts the Axum HTTP server.

use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use launchpad_gateway::api;
use launchpad_gateway::app_state::AppState;
use launchpad_gateway::config::GatewayConfig;
use launchpad_gateway::ledger::rpc::JsonRpcLedgerClient;
use launchpad_gateway::ledger::{ContractBinding, LedgerClient, Signer};
use launchpad_gateway::service::{FactoryQueries, LaunchService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        network = %config.network,
        factory = %config.factory_contract_id,
        pool_factory = %config.pool_factory_contract_id,
        "starting launchpad-gateway"
    );

    // Ledger clients, one per contract
    let factory: Arc<dyn LedgerClient> = Arc::new(
        JsonRpcLedgerClient::new(
            config.ledger_rpc_url.clone(),
            ContractBinding::new(
                "factory",
                config.factory_contract_id,
                Arc::clone(&config.factory_idl),
            ),
            config.rpc_timeout,
        )
        .context("building factory client")?,
    );
    let pool_factory: Arc<dyn LedgerClient> = Arc::new(
        JsonRpcLedgerClient::new(
            config.ledger_rpc_url.clone(),
            ContractBinding::new(
                "pool_factory",
                config.pool_factory_contract_id,
                Arc::clone(&config.pool_factory_idl),
            ),
            config.rpc_timeout,
        )
        .context("building pool factory client")?,
    );

    // Build service layer
    let launch_service = Arc::new(LaunchService::new(
        Arc::clone(&factory),
        Arc::clone(&pool_factory),
        config.launch,
    ));
    let queries = Arc::new(FactoryQueries::new(factory, pool_factory));

    let app_state = AppState {
        launch_service,
        queries,
        signer: Signer::new(config.wallet_name.clone()),
        auth: Arc::new(config.auth.clone()),
        network: Arc::from(config.network.as_str()),
    };

    // Build router
    let app = api::build_router(&app_state)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins))
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
