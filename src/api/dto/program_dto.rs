//! Program creation DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::{parse_address, parse_optional_address};
use crate::domain::{Address, MintAmount, ProgramInitConfig, TransactionOutcome};
use crate::error::GatewayError;

/// Request body for `POST /api/create-program`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProgramRequest {
    /// Token name, 1 to 100 characters.
    pub name: String,
    /// Token symbol, 1 to 20 characters; upper-cased on creation.
    pub symbol: String,
    /// Decimal places, 0 to 255.
    pub decimals: i64,
    /// Admin accounts (at least one).
    pub admins: Vec<String>,
    /// Initial supply as a decimal string.
    pub mint_amount: String,
    /// Recipient of the initial supply.
    pub mint_to: String,
}

impl CreateProgramRequest {
    /// Validates the request into a [`ProgramInitConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] on the first invalid field.
    pub fn to_config(&self) -> Result<ProgramInitConfig, GatewayError> {
        let decimals = u8::try_from(self.decimals).map_err(|_| {
            GatewayError::InvalidRequest("decimals: must be between 0 and 255".to_string())
        })?;
        let admins = self
            .admins
            .iter()
            .map(|a| parse_address("admins", a))
            .collect::<Result<Vec<Address>, _>>()?;
        let mint_amount: MintAmount = self
            .mint_amount
            .parse()
            .map_err(|e| GatewayError::InvalidRequest(format!("mint_amount: {e}")))?;
        let mint_to = parse_address("mint_to", &self.mint_to)?;

        ProgramInitConfig::new(
            self.name.clone(),
            &self.symbol,
            decimals,
            admins,
            mint_amount,
            mint_to,
        )
        .map_err(|e| GatewayError::InvalidRequest(e.to_string()))
    }
}

/// Request body for `POST /api/create-program-and-pool`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProgramAndPoolRequest {
    /// Program settings.
    #[serde(flatten)]
    pub program: CreateProgramRequest,
    /// Quote token; the configured default when omitted.
    #[serde(default)]
    pub registered_token: Option<String>,
}

impl CreateProgramAndPoolRequest {
    /// Validated optional quote token.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if it is malformed.
    pub fn registered_token(&self) -> Result<Option<Address>, GatewayError> {
        parse_optional_address("registered_token", self.registered_token.as_deref())
    }
}

/// Response data of `POST /api/create-program-and-pool`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgramAndPoolResponse {
    /// `programCreated` outcome of the mint.
    #[schema(value_type = Object)]
    pub program: TransactionOutcome,
    /// Address of the minted program.
    #[schema(value_type = String)]
    pub program_address: Address,
    /// Address of the new pool.
    #[schema(value_type = String)]
    pub pair_address: Address,
    /// Quote token the pool was requested with.
    #[schema(value_type = String)]
    pub registered_token: Address,
}
