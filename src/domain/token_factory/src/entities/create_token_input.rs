use alloy::primitives::U256;
use alloy::primitives::utils::parse_units;
use serde::Serialize;

pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;

/// Token creation form values, exactly as the user typed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTokenInput {
    pub name: String,
    pub symbol: String,
    pub supply: String,
}

/// Validated form of [`CreateTokenInput`], ready to be sent to the factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCreationRequest {
    pub name: String,
    pub symbol: String,
    /// Initial supply in the token's smallest unit.
    pub raw_supply: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
pub enum ValidationError {
    #[error("Name is required")]
    MissingName,
    #[error("Symbol is required")]
    MissingSymbol,
    #[error("Initial supply is required")]
    MissingSupply,
    #[error("Initial supply is not a valid amount: '{0}'")]
    MalformedSupply(String),
    #[error("Initial supply must be greater than zero")]
    ZeroSupply,
}

impl CreateTokenInput {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        supply: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            supply: supply.into(),
        }
    }

    /// Checks the form and scales the supply by `decimals`.
    ///
    /// Surrounding whitespace is ignored; a value made only of whitespace
    /// counts as missing.
    pub fn validate(&self, decimals: u8) -> Result<TokenCreationRequest, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        let symbol = self.symbol.trim();
        if symbol.is_empty() {
            return Err(ValidationError::MissingSymbol);
        }

        let supply = self.supply.trim();
        if supply.is_empty() {
            return Err(ValidationError::MissingSupply);
        }
        // NOTE: `parse_units()` accepts signed amounts and would hand us
        //       the two's complement of a negative supply.
        if supply.starts_with('-') {
            return Err(ValidationError::MalformedSupply(supply.to_string()));
        }

        let raw_supply: U256 = parse_units(supply, decimals)
            .map_err(|_| ValidationError::MalformedSupply(supply.to_string()))?
            .into();
        if raw_supply.is_zero() {
            return Err(ValidationError::ZeroSupply);
        }

        Ok(TokenCreationRequest {
            name: name.to_string(),
            symbol: symbol.to_string(),
            raw_supply,
        })
    }
}
