//! Read-only query handlers over both factories.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::api::dto::{AllPairsResponse, ApiResponse, PairAddressParams, PairAddressResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /api/admins`: Program factory admins.
///
/// # Errors
///
/// Returns [`GatewayError`] if the ledger query fails.
#[utoipa::path(
    get,
    path = "/api/admins",
    tag = "Queries",
    summary = "Program factory admins",
    responses(
        (status = 200, description = "`{admins: [address]}`", body = serde_json::Value),
        (status = 502, description = "Ledger query failed", body = ErrorResponse),
    )
)]
pub async fn admins(State(state): State<AppState>) -> Result<impl IntoResponse, GatewayError> {
    let admins = state.queries.admins().await?;
    Ok(Json(ApiResponse::data(json!({ "admins": admins }))))
}

/// `GET /api/id-to-address`: Program id index.
///
/// # Errors
///
/// Returns [`GatewayError`] if the ledger query fails.
#[utoipa::path(
    get,
    path = "/api/id-to-address",
    tag = "Queries",
    summary = "Program id to address index",
    responses(
        (status = 200, description = "`{idToAddress: [{id, address}]}`", body = serde_json::Value),
        (status = 502, description = "Ledger query failed", body = ErrorResponse),
    )
)]
pub async fn id_to_address(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    let index = state.queries.id_to_address().await?;
    Ok(Json(ApiResponse::data(json!({ "idToAddress": index }))))
}

/// `GET /api/number`: Number of minted programs.
///
/// # Errors
///
/// Returns [`GatewayError`] if the ledger query fails.
#[utoipa::path(
    get,
    path = "/api/number",
    tag = "Queries",
    summary = "Number of programs",
    responses(
        (status = 200, description = "`{totalPrograms}`", body = serde_json::Value),
        (status = 502, description = "Ledger query failed", body = ErrorResponse),
    )
)]
pub async fn number(State(state): State<AppState>) -> Result<impl IntoResponse, GatewayError> {
    let total = state.queries.number().await?;
    Ok(Json(ApiResponse::data(json!({ "totalPrograms": total }))))
}

/// `GET /api/registry`: Programs grouped by creator.
///
/// # Errors
///
/// Returns [`GatewayError`] if the ledger query fails.
#[utoipa::path(
    get,
    path = "/api/registry",
    tag = "Queries",
    summary = "Program registry",
    responses(
        (status = 200, description = "`{registry: [{creator, programs}]}`", body = serde_json::Value),
        (status = 502, description = "Ledger query failed", body = ErrorResponse),
    )
)]
pub async fn registry(State(state): State<AppState>) -> Result<impl IntoResponse, GatewayError> {
    let registry = state.queries.registry().await?;
    Ok(Json(ApiResponse::data(json!({ "registry": registry }))))
}

/// `GET /api/pool-factory-address`: Pool factory configured in the
/// program factory.
///
/// # Errors
///
/// Returns [`GatewayError`] if the ledger query fails.
#[utoipa::path(
    get,
    path = "/api/pool-factory-address",
    tag = "Queries",
    summary = "Pool factory address",
    responses(
        (status = 200, description = "`{poolFactoryAddress}`", body = serde_json::Value),
        (status = 502, description = "Ledger query failed", body = ErrorResponse),
    )
)]
pub async fn pool_factory_address(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    let address = state.queries.pool_factory_address().await?;
    Ok(Json(ApiResponse::data(
        json!({ "poolFactoryAddress": address }),
    )))
}

/// `GET /api/pair-address`: Pool address for two tokens.
///
/// # Errors
///
/// Returns [`GatewayError`] on missing or invalid tokens, or if the ledger
/// query fails.
#[utoipa::path(
    get,
    path = "/api/pair-address",
    tag = "Queries",
    summary = "Pool address for two tokens",
    params(PairAddressParams),
    responses(
        (status = 200, description = "Pair lookup result", body = ApiResponse<PairAddressResponse>),
        (status = 400, description = "Missing or invalid tokens", body = ErrorResponse),
        (status = 502, description = "Ledger query failed", body = ErrorResponse),
    )
)]
pub async fn pair_address(
    State(state): State<AppState>,
    Query(params): Query<PairAddressParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let key = params.pair_key()?;
    let pair_address = state.queries.pair_address(&key).await?;
    Ok(Json(ApiResponse::data(PairAddressResponse {
        token_a: key.token_a(),
        token_b: key.token_b(),
        pair_address,
        exists: pair_address.is_some(),
    })))
}

/// `GET /api/all-pairs`: Every registered pair.
///
/// # Errors
///
/// Returns [`GatewayError`] if the ledger query fails.
#[utoipa::path(
    get,
    path = "/api/all-pairs",
    tag = "Queries",
    summary = "All pairs",
    responses(
        (status = 200, description = "Pairs in registry order", body = ApiResponse<AllPairsResponse>),
        (status = 502, description = "Ledger query failed", body = ErrorResponse),
    )
)]
pub async fn all_pairs(State(state): State<AppState>) -> Result<impl IntoResponse, GatewayError> {
    let pairs = state.queries.all_pairs().await?;
    Ok(Json(ApiResponse::data(AllPairsResponse {
        total: pairs.len(),
        pairs,
    })))
}

/// `GET /api/fee-to`: Protocol fee recipient.
///
/// # Errors
///
/// Returns [`GatewayError`] if the ledger query fails.
#[utoipa::path(
    get,
    path = "/api/fee-to",
    tag = "Queries",
    summary = "Fee recipient",
    responses(
        (status = 200, description = "`{feeTo}`", body = serde_json::Value),
        (status = 502, description = "Ledger query failed", body = ErrorResponse),
    )
)]
pub async fn fee_to(State(state): State<AppState>) -> Result<impl IntoResponse, GatewayError> {
    let fee_to = state.queries.fee_to().await?;
    Ok(Json(ApiResponse::data(json!({ "feeTo": fee_to }))))
}

/// `GET /api/treasury-id`: Pool factory treasury.
///
/// # Errors
///
/// Returns [`GatewayError`] if the ledger query fails.
#[utoipa::path(
    get,
    path = "/api/treasury-id",
    tag = "Queries",
    summary = "Treasury account",
    responses(
        (status = 200, description = "`{treasuryId}`", body = serde_json::Value),
        (status = 502, description = "Ledger query failed", body = ErrorResponse),
    )
)]
pub async fn treasury_id(State(state): State<AppState>) -> Result<impl IntoResponse, GatewayError> {
    let treasury_id = state.queries.treasury_id().await?;
    Ok(Json(ApiResponse::data(json!({ "treasuryId": treasury_id }))))
}

/// Query routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admins", get(admins))
        .route("/id-to-address", get(id_to_address))
        .route("/number", get(number))
        .route("/registry", get(registry))
        .route("/pool-factory-address", get(pool_factory_address))
        .route("/pair-address", get(pair_address))
        .route("/all-pairs", get(all_pairs))
        .route("/fee-to", get(fee_to))
        .route("/treasury-id", get(treasury_id))
}
