use std::time::Duration;

use alloy::primitives::TxHash;
use serde::Serialize;

use crate::entities::ValidationError;

/// Failures reported by a [`crate::services::WalletGateway`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("No wallet provider is available")]
    Unavailable,
    #[error("Request was rejected in the wallet")]
    UserRejected,
    #[error("Transaction {0} reverted")]
    Reverted(TxHash),
    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
pub enum CreateTokenError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No wallet provider or account is available")]
    GatewayUnavailable,
    #[error("Token creation was rejected in the wallet")]
    UserRejected,
    #[error("Token creation transaction {0} reverted")]
    Reverted(TxHash),
    #[error("Network error: {0}")]
    Network(String),
    #[error("No outcome after {0:?}, the wallet may still complete the transaction")]
    Timeout(Duration),
    #[error("Stopped waiting before the outcome was known")]
    Cancelled,
    #[error("Another token creation is already pending")]
    Busy,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CreateTokenErrorKind {
    Validation,
    GatewayUnavailable,
    UserRejected,
    Reverted,
    Network,
    Timeout,
    Cancelled,
    Busy,
}

impl CreateTokenError {
    pub fn kind(&self) -> CreateTokenErrorKind {
        use CreateTokenErrorKind as Kind;

        match self {
            Self::Validation(_) => Kind::Validation,
            Self::GatewayUnavailable => Kind::GatewayUnavailable,
            Self::UserRejected => Kind::UserRejected,
            Self::Reverted(_) => Kind::Reverted,
            Self::Network(_) => Kind::Network,
            Self::Timeout(_) => Kind::Timeout,
            Self::Cancelled => Kind::Cancelled,
            Self::Busy => Kind::Busy,
        }
    }
}

impl CreateTokenErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::GatewayUnavailable => "gateway_unavailable",
            Self::UserRejected => "user_rejected",
            Self::Reverted => "reverted",
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
            Self::Busy => "busy",
        }
    }
}

impl From<GatewayError> for CreateTokenError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Unavailable => Self::GatewayUnavailable,
            GatewayError::UserRejected => Self::UserRejected,
            GatewayError::Reverted(tx_hash) => Self::Reverted(tx_hash),
            GatewayError::Network(message) => Self::Network(message),
        }
    }
}
