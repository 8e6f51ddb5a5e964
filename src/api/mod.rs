//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Resource endpoints are mounted under `/api` behind the API-key check;
//! `/` and `/api/health` are always open.

pub mod auth;
pub mod dto;
pub mod handlers;

use axum::Router;
use axum::middleware;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for every endpoint.
#[derive(OpenApi)]
#[openapi(
    info(title = "launchpad-gateway", description = "Token program and pool launch gateway"),
    paths(
        handlers::system::index_handler,
        handlers::system::health_handler,
        handlers::program::create_program,
        handlers::program::create_program_and_pool,
        handlers::pool::create_pool,
        handlers::pool::create_pool_with_registered_token,
        handlers::query::admins,
        handlers::query::id_to_address,
        handlers::query::number,
        handlers::query::registry,
        handlers::query::pool_factory_address,
        handlers::query::pair_address,
        handlers::query::all_pairs,
        handlers::query::fee_to,
        handlers::query::treasury_id,
    ),
    components(schemas(crate::error::ErrorResponse, crate::error::ErrorBody)),
    tags(
        (name = "Programs", description = "Token program minting"),
        (name = "Pools", description = "Pool creation"),
        (name = "Queries", description = "Read-only factory queries"),
        (name = "System", description = "Index and health"),
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Builds the complete API router.
///
/// `state` is needed up front to install the API-key middleware.
pub fn build_router(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/api", handlers::routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    let router = Router::new()
        .merge(protected)
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

/// Serialized OpenAPI document.
#[must_use]
pub fn openapi_json() -> String {
    ApiDoc::openapi().to_pretty_json().unwrap_or_default()
}
