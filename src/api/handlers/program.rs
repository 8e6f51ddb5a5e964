//! Program handlers: mint a token program, optionally with its pool.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{
    ApiResponse, CreateProgramAndPoolRequest, CreateProgramRequest, ProgramAndPoolResponse,
    json_body,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /api/create-program`: Mint a token program.
///
/// # Errors
///
/// Returns [`GatewayError`] on invalid input or a failed ledger call.
#[utoipa::path(
    post,
    path = "/api/create-program",
    tag = "Programs",
    summary = "Create a token program",
    description = "Mints a new token program through the program factory and returns the decoded `programCreated` outcome.",
    request_body = CreateProgramRequest,
    responses(
        (status = 200, description = "Program created", body = serde_json::Value),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 422, description = "Rejected by the ledger", body = ErrorResponse),
        (status = 502, description = "Ledger read failed or unexpected reply", body = ErrorResponse),
        (status = 504, description = "Submission timed out; check the ledger before retrying", body = ErrorResponse),
    )
)]
pub async fn create_program(
    State(state): State<AppState>,
    payload: Result<Json<CreateProgramRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let config = json_body(payload)?.to_config()?;
    let outcome = state
        .launch_service
        .create_program(&config, &state.signer)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Program created successfully",
        outcome,
    )))
}

/// `POST /api/create-program-and-pool`: Mint a program and pair it.
///
/// # Errors
///
/// Returns [`GatewayError`] on invalid input or a failed ledger call. If
/// the program was minted before the failure, its address is reported in
/// the error `details`.
#[utoipa::path(
    post,
    path = "/api/create-program-and-pool",
    tag = "Programs",
    summary = "Create a token program and its pool",
    description = "Mints a program, waits for it to settle, then creates a pool pairing it with `registered_token` (or the configured default).",
    request_body = CreateProgramAndPoolRequest,
    responses(
        (status = 200, description = "Program and pool created", body = ApiResponse<ProgramAndPoolResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 422, description = "Rejected by the ledger", body = ErrorResponse),
        (status = 502, description = "Ledger read failed or pool unresolved", body = ErrorResponse),
        (status = 504, description = "Submission timed out; check the ledger before retrying", body = ErrorResponse),
    )
)]
pub async fn create_program_and_pool(
    State(state): State<AppState>,
    payload: Result<Json<CreateProgramAndPoolRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let req = json_body(payload)?;
    let config = req.program.to_config()?;
    let registered_token = req.registered_token()?;

    let created = state
        .launch_service
        .create_program_and_pool(&config, registered_token, &state.signer)
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Program and pool created successfully",
        ProgramAndPoolResponse {
            program: created.program,
            program_address: created.program_address,
            pair_address: created.pair_address,
            registered_token: created.registered_token,
        },
    )))
}

/// Program routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/create-program", post(create_program))
        .route("/create-program-and-pool", post(create_program_and_pool))
}
