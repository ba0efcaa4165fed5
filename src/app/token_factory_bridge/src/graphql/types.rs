use async_graphql::{Enum, SimpleObject};
use token_factory::entities::{
    CreateTokenError,
    CreateTokenErrorKind,
    TokenRecord,
    TransactionSnapshot,
    TransactionState,
};

#[derive(SimpleObject, Debug, Clone)]
pub struct Token {
    /// Empty when only the address is known
    pub name: String,
    /// Empty when only the address is known
    pub symbol: String,
    pub address: String,
}

impl From<TokenRecord> for Token {
    fn from(value: TokenRecord) -> Self {
        Self {
            name: value.name,
            symbol: value.symbol,
            address: value.address.to_string(),
        }
    }
}

#[derive(Enum, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransactionStage {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Enum, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransactionFailureKind {
    Validation,
    GatewayUnavailable,
    UserRejected,
    Reverted,
    Network,
    Timeout,
    Cancelled,
    Busy,
}

impl From<CreateTokenErrorKind> for TransactionFailureKind {
    fn from(value: CreateTokenErrorKind) -> Self {
        match value {
            CreateTokenErrorKind::Validation => Self::Validation,
            CreateTokenErrorKind::GatewayUnavailable => Self::GatewayUnavailable,
            CreateTokenErrorKind::UserRejected => Self::UserRejected,
            CreateTokenErrorKind::Reverted => Self::Reverted,
            CreateTokenErrorKind::Network => Self::Network,
            CreateTokenErrorKind::Timeout => Self::Timeout,
            CreateTokenErrorKind::Cancelled => Self::Cancelled,
            CreateTokenErrorKind::Busy => Self::Busy,
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct TransactionStatus {
    /// Number of the creation attempt, `0` before the first one
    pub attempt: u64,
    pub stage: TransactionStage,
    /// Known once the wallet has broadcast the transaction
    pub tx_hash: Option<String>,
    pub token: Option<Token>,
    pub failure_kind: Option<TransactionFailureKind>,
    pub failure_message: Option<String>,
}

impl From<TransactionSnapshot> for TransactionStatus {
    fn from(value: TransactionSnapshot) -> Self {
        let mut status = Self {
            attempt: value.attempt,
            stage: TransactionStage::Idle,
            tx_hash: None,
            token: None,
            failure_kind: None,
            failure_message: None,
        };

        match value.state {
            TransactionState::Idle => {}
            TransactionState::Pending { tx_hash } => {
                status.stage = TransactionStage::Pending;
                status.tx_hash = tx_hash.map(|tx_hash| tx_hash.to_string());
            }
            TransactionState::Succeeded(token) => {
                status.stage = TransactionStage::Succeeded;
                status.token = Some(token.into());
            }
            TransactionState::Failed(e) => {
                status.stage = TransactionStage::Failed;
                if let CreateTokenError::Reverted(tx_hash) = &e {
                    status.tx_hash = Some(tx_hash.to_string());
                }
                status.failure_kind = Some(e.kind().into());
                status.failure_message = Some(e.to_string());
            }
        }

        status
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct CreateTokenPayload {
    /// Set when the token was created
    pub token: Option<Token>,
    pub failure_kind: Option<TransactionFailureKind>,
    pub failure_message: Option<String>,
}

impl From<Result<TokenRecord, CreateTokenError>> for CreateTokenPayload {
    fn from(value: Result<TokenRecord, CreateTokenError>) -> Self {
        match value {
            Ok(token) => Self {
                token: Some(token.into()),
                failure_kind: None,
                failure_message: None,
            },
            Err(e) => Self {
                token: None,
                failure_kind: Some(e.kind().into()),
                failure_message: Some(e.to_string()),
            },
        }
    }
}
