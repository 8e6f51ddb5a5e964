//! Pool handlers: explicit pairs and registered-token pairs.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{
    ApiResponse, CreatePoolRequest, CreatePoolWithRegisteredTokenRequest, PoolCreationResponse,
    json_body,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};
use crate::service::PairCreation;

fn creation_response(creation: PairCreation) -> ApiResponse<PoolCreationResponse> {
    let message = if creation.already_existed() {
        "Pool already exists"
    } else {
        "Pool created successfully"
    };
    ApiResponse::with_message(
        message,
        PoolCreationResponse {
            pair_address: creation.address(),
            already_exists: creation.already_existed(),
        },
    )
}

/// `POST /api/create-pool`: Create a pool for two tokens.
///
/// # Errors
///
/// Returns [`GatewayError`] on invalid input or a failed ledger call.
#[utoipa::path(
    post,
    path = "/api/create-pool",
    tag = "Pools",
    summary = "Create a pool for two tokens",
    description = "Returns the existing pool without submitting anything if the pair is already registered (in either token order).",
    request_body = CreatePoolRequest,
    responses(
        (status = 200, description = "Pool created or already existing", body = ApiResponse<PoolCreationResponse>),
        (status = 400, description = "Invalid or identical tokens", body = ErrorResponse),
        (status = 422, description = "Rejected by the ledger", body = ErrorResponse),
        (status = 502, description = "Ledger read failed or pool unresolved", body = ErrorResponse),
        (status = 504, description = "Submission timed out; check the ledger before retrying", body = ErrorResponse),
    )
)]
pub async fn create_pool(
    State(state): State<AppState>,
    payload: Result<Json<CreatePoolRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let key = json_body(payload)?.pair_key()?;
    let creation = state
        .launch_service
        .create_pool(key, &state.signer)
        .await?;
    Ok(Json(creation_response(creation)))
}

/// `POST /api/create-pool-with-registered-token`: Pair a token with a
/// registered quote token.
///
/// # Errors
///
/// Returns [`GatewayError`] on invalid input or a failed ledger call.
#[utoipa::path(
    post,
    path = "/api/create-pool-with-registered-token",
    tag = "Pools",
    summary = "Create a pool with a registered token",
    description = "Pairs `token` with `registered_token`, or with the factory's default quote token when omitted. The existence check only runs when `registered_token` is given.",
    request_body = CreatePoolWithRegisteredTokenRequest,
    responses(
        (status = 200, description = "Pool created or already existing", body = ApiResponse<PoolCreationResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 422, description = "Rejected by the ledger", body = ErrorResponse),
        (status = 502, description = "Ledger read failed or pool unresolved", body = ErrorResponse),
        (status = 504, description = "Submission timed out; check the ledger before retrying", body = ErrorResponse),
    )
)]
pub async fn create_pool_with_registered_token(
    State(state): State<AppState>,
    payload: Result<Json<CreatePoolWithRegisteredTokenRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let (token, registered) = json_body(payload)?.tokens()?;
    let creation = state
        .launch_service
        .create_pool_with_registered_token(token, registered, &state.signer)
        .await?;
    Ok(Json(creation_response(creation)))
}

/// Pool routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/create-pool", post(create_pool))
        .route(
            "/create-pool-with-registered-token",
            post(create_pool_with_registered_token),
        )
}
