//! API-key check for the mutating and query routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::app_state::AppState;
use crate::error::GatewayError;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "api-key";

/// Rejects the request unless auth is disabled or the `api-key` header
/// matches: missing → 401, mismatch → 403.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !state.auth.enabled {
        return next.run(request).await;
    }
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    match (provided, state.auth.api_key.as_deref()) {
        (None, _) => GatewayError::Unauthorized.into_response(),
        (Some(given), Some(expected)) if given == expected => next.run(request).await,
        (Some(_), _) => GatewayError::Forbidden.into_response(),
    }
}
