//! Shared DTO types and boundary validation helpers.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Address;
use crate::error::GatewayError;

/// Success envelope returned by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Always `true`; failures use [`crate::error::ErrorResponse`].
    pub success: bool,
    /// Optional human-readable summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Endpoint payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` without a message.
    #[must_use]
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    /// Wraps `data` with a message.
    #[must_use]
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Unwraps a JSON body, turning extractor rejections into a 400.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] with the rejection text.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, GatewayError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))
}

/// Parses a request field as an [`Address`].
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] naming `field`.
pub fn parse_address(field: &str, value: &str) -> Result<Address, GatewayError> {
    value
        .parse()
        .map_err(|e| GatewayError::InvalidRequest(format!("{field}: {e}")))
}

/// Parses an optional request field as an [`Address`]; blank means absent.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] naming `field`.
pub fn parse_optional_address(
    field: &str,
    value: Option<&str>,
) -> Result<Option<Address>, GatewayError> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| parse_address(field, v))
        .transpose()
}
