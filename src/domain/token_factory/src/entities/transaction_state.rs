use alloy::primitives::TxHash;
use serde::Serialize;

use crate::entities::{CreateTokenError, TokenRecord};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub enum TransactionState {
    #[default]
    Idle,
    /// Submitted to the wallet. The hash is known once the wallet has
    /// broadcast the transaction.
    Pending { tx_hash: Option<TxHash> },
    Succeeded(TokenRecord),
    Failed(CreateTokenError),
}

impl TransactionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }
}

/// [`TransactionState`] tagged with the creation attempt it belongs to.
///
/// Attempts are numbered from 1; attempt 0 is the initial idle state.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionSnapshot {
    pub attempt: u64,
    pub state: TransactionState,
}
