//! Pool creation DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::{parse_address, parse_optional_address};
use crate::domain::{Address, PairKey};
use crate::error::GatewayError;

/// Request body for `POST /api/create-pool`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePoolRequest {
    /// First token.
    pub token_a: String,
    /// Second token.
    pub token_b: String,
}

impl CreatePoolRequest {
    /// Validates both tokens into a [`PairKey`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] for malformed or identical
    /// tokens.
    pub fn pair_key(&self) -> Result<PairKey, GatewayError> {
        let token_a = parse_address("token_a", &self.token_a)?;
        let token_b = parse_address("token_b", &self.token_b)?;
        PairKey::new(token_a, token_b).map_err(|e| GatewayError::InvalidRequest(e.to_string()))
    }
}

/// Request body for `POST /api/create-pool-with-registered-token`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePoolWithRegisteredTokenRequest {
    /// Token to list.
    pub token: String,
    /// Quote token; the factory's default when omitted.
    #[serde(default)]
    pub registered_token: Option<String>,
}

impl CreatePoolWithRegisteredTokenRequest {
    /// Validates the tokens.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] for malformed tokens or a
    /// token paired with itself.
    pub fn tokens(&self) -> Result<(Address, Option<Address>), GatewayError> {
        let token = parse_address("token", &self.token)?;
        let registered =
            parse_optional_address("registered_token", self.registered_token.as_deref())?;
        if registered == Some(token) {
            return Err(GatewayError::InvalidRequest(
                "token and registered_token must differ".to_string(),
            ));
        }
        Ok((token, registered))
    }
}

/// Response data of the pool creation endpoints.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoolCreationResponse {
    /// Pool address.
    #[schema(value_type = String)]
    pub pair_address: Address,
    /// `true` if the pool existed and nothing was submitted.
    pub already_exists: bool,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const A: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const B: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    #[test]
    fn identical_tokens_are_invalid() {
        let req = CreatePoolRequest {
            token_a: A.to_string(),
            token_b: A.to_uppercase().replacen("0X", "0x", 1),
        };
        let Err(GatewayError::InvalidRequest(_)) = req.pair_key() else {
            panic!("expected rejection");
        };
    }

    #[test]
    fn registered_token_is_optional() {
        let req = CreatePoolWithRegisteredTokenRequest {
            token: A.to_string(),
            registered_token: None,
        };
        assert!(matches!(req.tokens(), Ok((_, None))));

        let req = CreatePoolWithRegisteredTokenRequest {
            token: A.to_string(),
            registered_token: Some(B.to_string()),
        };
        assert!(matches!(req.tokens(), Ok((_, Some(_)))));

        let req = CreatePoolWithRegisteredTokenRequest {
            token: A.to_string(),
            registered_token: Some(A.to_string()),
        };
        assert!(req.tokens().is_err());
    }

    #[test]
    fn response_uses_camel_case() {
        let Ok(json) = serde_json::to_value(PoolCreationResponse {
            pair_address: Address::from_bytes([0x99; 32]),
            already_exists: true,
        }) else {
            panic!("serializes");
        };
        assert_eq!(json["alreadyExists"], true);
        assert!(json["pairAddress"].is_string());
    }
}
