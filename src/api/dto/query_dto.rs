//! Query endpoint DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::parse_address;
use crate::domain::{Address, PairKey, PairRecord};
use crate::error::GatewayError;

/// Query string of `GET /api/pair-address`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PairAddressParams {
    /// First token.
    pub token_a: Option<String>,
    /// Second token.
    pub token_b: Option<String>,
}

impl PairAddressParams {
    /// Validates both tokens into a [`PairKey`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if a token is missing,
    /// malformed, or both are the same.
    pub fn pair_key(&self) -> Result<PairKey, GatewayError> {
        let (Some(a), Some(b)) = (self.token_a.as_deref(), self.token_b.as_deref()) else {
            return Err(GatewayError::InvalidRequest(
                "token_a and token_b are required".to_string(),
            ));
        };
        let token_a = parse_address("token_a", a)?;
        let token_b = parse_address("token_b", b)?;
        PairKey::new(token_a, token_b).map_err(|e| GatewayError::InvalidRequest(e.to_string()))
    }
}

/// Response data of `GET /api/pair-address`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PairAddressResponse {
    /// First token as requested.
    #[schema(value_type = String)]
    pub token_a: Address,
    /// Second token as requested.
    #[schema(value_type = String)]
    pub token_b: Address,
    /// Pool address, `null` when no pool exists.
    #[schema(value_type = Option<String>)]
    pub pair_address: Option<Address>,
    /// Whether the pool exists.
    pub exists: bool,
}

/// Response data of `GET /api/all-pairs`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AllPairsResponse {
    /// Pairs in registry order.
    #[schema(value_type = Vec<Object>)]
    pub pairs: Vec<PairRecord>,
    /// Number of pairs.
    pub total: usize,
}
