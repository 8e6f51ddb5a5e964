//! Error types.
//!
//! [`OrchestrationError`] is the core's failure taxonomy: every variant is
//! terminal for the current request and carries the operation name and key
//! inputs. [`GatewayError`] is the HTTP-facing error; each variant maps to a
//! specific status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Address;
use crate::ledger::LedgerError;

/// Failure of an orchestration operation.
///
/// None of these are retried inside the core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrchestrationError {
    /// Gas estimation for a signed call failed.
    #[error("{operation}: gas estimation failed: {source}")]
    GasEstimationFailed {
        /// Operation that was being prepared.
        operation: &'static str,
        /// Underlying ledger error.
        source: LedgerError,
    },

    /// The signed call was rejected (signer, nonce, balance) or its
    /// finalized reply could not be obtained.
    #[error("{operation}: submission rejected: {source}")]
    SubmissionRejected {
        /// Operation that was submitted.
        operation: &'static str,
        /// Underlying ledger error.
        source: LedgerError,
    },

    /// The signed call was sent but no reply arrived in time. It may still
    /// finalize, so the caller must check the ledger before retrying.
    #[error("{operation}: submission outcome unknown, check the ledger before retrying: {source}")]
    SubmissionOutcomeUnknown {
        /// Operation that was submitted.
        operation: &'static str,
        /// Underlying ledger error.
        source: LedgerError,
    },

    /// A read-only query failed (transport or decode).
    #[error("{operation}: ledger query failed: {source}")]
    LedgerQueryError {
        /// Query that failed.
        operation: &'static str,
        /// Underlying ledger error.
        source: LedgerError,
    },

    /// The decoded reply lacks the expected discriminant or payload.
    #[error("{operation}: expected {expected} outcome, got {actual}")]
    UnexpectedOutcome {
        /// Operation whose reply was decoded.
        operation: &'static str,
        /// Discriminant that was required.
        expected: &'static str,
        /// What was received (discriminant or decoder message).
        actual: String,
    },

    /// The `programCreated` outcome carried no usable program address.
    #[error("{operation}: {discriminant} outcome for {symbol} carries no program address")]
    MissingProgramAddress {
        /// Operation whose reply was decoded.
        operation: &'static str,
        /// Discriminant of the decoded reply.
        discriminant: &'static str,
        /// Symbol of the program that was minted.
        symbol: String,
    },

    /// The pool creation call finalized but the pair cannot be read back.
    #[error("{operation}: pool created but pair address not found for {token} / {}", counterpart_label(.counterpart))]
    PoolCreatedButUnresolved {
        /// Creation path that was taken.
        operation: &'static str,
        /// Token the pool was created for.
        token: Address,
        /// Other side of the pair, when known to the caller.
        counterpart: Option<Address>,
    },

    /// The program was minted but creating its pool failed. The program
    /// exists on the ledger; pool creation must be resumed with
    /// `program_address`.
    #[error("program minted at {program_address} but pool creation failed: {source}")]
    ProgramMintedButPoolFailed {
        /// Address of the minted program.
        program_address: Address,
        /// Failure of the pool step.
        source: Box<OrchestrationError>,
    },
}

fn counterpart_label(counterpart: &Option<Address>) -> String {
    counterpart.map_or_else(|| "default registered token".to_string(), |a| a.to_string())
}

impl OrchestrationError {
    /// Program address that survived a partial failure, if any.
    #[must_use]
    pub fn recoverable_program_address(&self) -> Option<Address> {
        match self {
            Self::ProgramMintedButPoolFailed {
                program_address, ..
            } => Some(*program_address),
            _ => None,
        }
    }

    /// The failure that decides the error category, looking through
    /// partial-failure wrappers.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::ProgramMintedButPoolFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4002,
///     "message": "create_program: submission rejected: ...",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see [`GatewayError`] code ranges).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category                    | HTTP Status               |
/// |-----------|-----------------------------|---------------------------|
/// | 1000–1099 | Validation                  | 400 Bad Request           |
/// | 1100–1199 | Authentication              | 401 / 403                 |
/// | 3000–3999 | Ledger / consistency        | 500 / 502 / 504           |
/// | 4000–4999 | Rejected by the ledger      | 422 Unprocessable Entity  |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The `api-key` header is missing.
    #[error("api key is required")]
    Unauthorized,

    /// The `api-key` header does not match.
    #[error("invalid api key")]
    Forbidden,

    /// An orchestration operation failed.
    #[error(transparent)]
    Orchestration(#[from] OrchestrationError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Unauthorized => 1101,
            Self::Forbidden => 1102,
            Self::Internal(_) => 3000,
            Self::Orchestration(e) => match e.root() {
                OrchestrationError::LedgerQueryError { .. } => 3001,
                OrchestrationError::UnexpectedOutcome { .. } => 3002,
                OrchestrationError::MissingProgramAddress { .. } => 3003,
                OrchestrationError::PoolCreatedButUnresolved { .. } => 3004,
                OrchestrationError::SubmissionOutcomeUnknown { .. } => 3005,
                OrchestrationError::GasEstimationFailed { .. } => 4001,
                OrchestrationError::SubmissionRejected { .. } => 4002,
                OrchestrationError::ProgramMintedButPoolFailed { .. } => 3000,
            },
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Orchestration(e) => match e.root() {
                OrchestrationError::GasEstimationFailed { .. }
                | OrchestrationError::SubmissionRejected { .. } => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                OrchestrationError::SubmissionOutcomeUnknown { .. } => {
                    StatusCode::GATEWAY_TIMEOUT
                }
                _ => StatusCode::BAD_GATEWAY,
            },
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::Orchestration(e) => e
                .recoverable_program_address()
                .map(|addr| format!("program_address={addr}")),
            _ => None,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected() -> OrchestrationError {
        OrchestrationError::SubmissionRejected {
            operation: "create_pool",
            source: LedgerError::Rpc {
                code: 1010,
                message: "inability to pay some fees".to_string(),
            },
        }
    }

    #[test]
    fn ledger_rejections_are_unprocessable() {
        let err = GatewayError::from(rejected());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), 4002);
        assert!(err.to_string().contains("create_pool"));
    }

    #[test]
    fn consistency_gap_is_bad_gateway() {
        let err = GatewayError::from(OrchestrationError::PoolCreatedButUnresolved {
            operation: "create_explicit_pair",
            token: Address::from_bytes([1u8; 32]),
            counterpart: None,
        });
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(err.to_string().contains("default registered token"));
    }

    #[test]
    fn partial_failure_keeps_program_address_and_inner_category() {
        let program = Address::from_bytes([0xc0; 32]);
        let err = GatewayError::from(OrchestrationError::ProgramMintedButPoolFailed {
            program_address: program,
            source: Box::new(rejected()),
        });
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), 4002);
        assert_eq!(err.details(), Some(format!("program_address={program}")));
    }

    #[test]
    fn timed_out_submission_is_gateway_timeout_not_rejection() {
        let err = GatewayError::from(OrchestrationError::ProgramMintedButPoolFailed {
            program_address: Address::from_bytes([0xc0; 32]),
            source: Box::new(OrchestrationError::SubmissionOutcomeUnknown {
                operation: "create_with_registered_token",
                source: LedgerError::Timeout("operation timed out".to_string()),
            }),
        });
        assert_eq!(err.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.error_code(), 3005);
        assert!(err.to_string().contains("check the ledger before retrying"));
    }

    #[test]
    fn missing_program_address_names_operation_and_symbol() {
        let err = GatewayError::from(OrchestrationError::MissingProgramAddress {
            operation: "create_program",
            discriminant: "programCreated",
            symbol: "ALPHA".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), 3003);
        let message = err.to_string();
        assert!(message.contains("create_program"));
        assert!(message.contains("ALPHA"));
    }

    #[test]
    fn validation_and_auth_codes() {
        assert_eq!(
            GatewayError::InvalidRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(GatewayError::Forbidden.error_code(), 1102);
    }
}
