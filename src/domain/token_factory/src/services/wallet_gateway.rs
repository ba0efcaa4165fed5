use alloy::primitives::{Address, TxHash};
use async_trait::async_trait;

use crate::entities::{GatewayError, TokenCreationRequest};

/// Access to the wallet that acts on behalf of the user and to the token
/// factory it talks to.
///
/// Creation is reported in two steps: [`Self::submit_create_token`] resolves
/// once the transaction hash is known, [`Self::wait_for_token_created`] once
/// the transaction is final.
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait]
pub trait WalletGateway: Send + Sync {
    async fn current_account(&self) -> Result<Option<Address>, GatewayError>;

    async fn submit_create_token(
        &self,
        from: Address,
        request: TokenCreationRequest,
    ) -> Result<TxHash, GatewayError>;

    /// Returns the address of the token deployed by the transaction.
    async fn wait_for_token_created(&self, tx_hash: TxHash) -> Result<Address, GatewayError>;

    async fn fetch_tokens_by_owner(&self, owner: Address) -> Result<Vec<Address>, GatewayError>;
}
