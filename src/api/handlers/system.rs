//! System endpoints: endpoint index and health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::ApiResponse;
use crate::app_state::AppState;

/// Health check payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
    network: String,
    timestamp: String,
    version: &'static str,
}

/// `GET /api/health`: Service health status.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service status, the configured ledger network and the current timestamp. Does not touch the ledger.",
    responses(
        (status = 200, description = "Service is up", body = ApiResponse<HealthResponse>),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::with_message(
            "Server running",
            HealthResponse {
                status: "ok",
                network: state.network.to_string(),
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION"),
            },
        )),
    )
}

/// Endpoint catalog entry.
#[derive(Debug, Serialize, ToSchema)]
struct EndpointInfo {
    method: &'static str,
    path: &'static str,
    description: &'static str,
}

const ENDPOINTS: &[EndpointInfo] = &[
    EndpointInfo { method: "GET", path: "/api/health", description: "Service health" },
    EndpointInfo { method: "POST", path: "/api/create-program", description: "Mint a token program" },
    EndpointInfo { method: "POST", path: "/api/create-pool", description: "Create a pool for two tokens" },
    EndpointInfo {
        method: "POST",
        path: "/api/create-pool-with-registered-token",
        description: "Pair a token with a registered quote token",
    },
    EndpointInfo {
        method: "POST",
        path: "/api/create-program-and-pool",
        description: "Mint a program and create its pool",
    },
    EndpointInfo { method: "GET", path: "/api/admins", description: "Program factory admins" },
    EndpointInfo { method: "GET", path: "/api/id-to-address", description: "Program id index" },
    EndpointInfo { method: "GET", path: "/api/number", description: "Number of programs" },
    EndpointInfo { method: "GET", path: "/api/registry", description: "Programs by creator" },
    EndpointInfo {
        method: "GET",
        path: "/api/pool-factory-address",
        description: "Pool factory address",
    },
    EndpointInfo {
        method: "GET",
        path: "/api/pair-address?token_a=&token_b=",
        description: "Pool address for two tokens",
    },
    EndpointInfo { method: "GET", path: "/api/all-pairs", description: "All registered pairs" },
    EndpointInfo { method: "GET", path: "/api/fee-to", description: "Fee recipient" },
    EndpointInfo { method: "GET", path: "/api/treasury-id", description: "Treasury account" },
];

/// `GET /`: Endpoint index.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    summary = "Endpoint index",
    responses(
        (status = 200, description = "Available endpoints", body = ApiResponse<Vec<EndpointInfo>>),
    )
)]
pub async fn index_handler() -> impl IntoResponse {
    Json(ApiResponse::with_message(
        concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")),
        ENDPOINTS,
    ))
}

/// Routes exempt from the API key: `/` and `/api/health`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/health", get(health_handler))
}
