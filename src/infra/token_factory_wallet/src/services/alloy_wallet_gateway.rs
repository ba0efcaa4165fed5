use alloy::contract;
use alloy::network::ReceiptResponse as _;
use alloy::primitives::{Address, TxHash};
use alloy::providers::{DynProvider, PendingTransactionBuilder, PendingTransactionError, Provider};
use alloy::transports::TransportError;
use alloy_ext::prelude::*;
use async_trait::async_trait;
use token_factory::entities::{GatewayError, TokenCreationRequest};
use token_factory::services::WalletGateway;
use token_factory_contracts::TokenFactory;
use token_factory_contracts::prelude::*;

/// [`WalletGateway`] backed by a JSON-RPC node that manages the acting
/// account: the node (or the wallet behind it) signs, alloy fills gas and
/// nonce.
pub struct AlloyWalletGateway {
    provider: DynProvider,
    token_factory: TokenFactory::TokenFactoryInstance<DynProvider>,
    required_confirmations: u64,
}

impl AlloyWalletGateway {
    pub fn new(
        provider: DynProvider,
        token_factory_address: Address,
        required_confirmations: u64,
    ) -> Self {
        let token_factory = TokenFactory::new(token_factory_address, provider.clone());

        Self {
            provider,
            token_factory,
            required_confirmations,
        }
    }
}

#[async_trait]
impl WalletGateway for AlloyWalletGateway {
    #[tracing::instrument(level = "debug", skip_all)]
    async fn current_account(&self) -> Result<Option<Address>, GatewayError> {
        let accounts = self
            .provider
            .get_accounts()
            .await
            .map_err(|e| map_transport_error(&e))?;

        Ok(accounts.first().copied())
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(from = %from, name = %request.name, symbol = %request.symbol)
    )]
    async fn submit_create_token(
        &self,
        from: Address,
        request: TokenCreationRequest,
    ) -> Result<TxHash, GatewayError> {
        let pending_tx = self
            .token_factory
            .createToken(request.name, request.symbol, request.raw_supply)
            .from(from)
            .send()
            .await
            .map_err(|e| map_contract_error(&e))?;

        Ok(*pending_tx.tx_hash())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(tx_hash = %tx_hash))]
    async fn wait_for_token_created(&self, tx_hash: TxHash) -> Result<Address, GatewayError> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .with_required_confirmations(self.required_confirmations)
            .get_receipt()
            .await
            .map_err(|e| map_pending_transaction_error(&e))?;

        if !receipt.status() {
            return Err(GatewayError::Reverted(tx_hash));
        }

        let factory_address = *self.token_factory.address();
        for log in receipt.inner.logs() {
            if log.address() != factory_address
                || log.event_signature_hash() != Some(TokenFactory::TokenCreated::SIGNATURE_HASH)
            {
                continue;
            }

            let event = TokenFactory::TokenCreated::decode_log(&log.inner)
                .map_err(|e| GatewayError::Network(format!("Malformed TokenCreated event: {e}")))?;

            return Ok(event.tokenAddress);
        }

        Err(GatewayError::Network(format!(
            "Transaction {tx_hash} emitted no TokenCreated event"
        )))
    }

    #[tracing::instrument(level = "debug", skip_all, fields(owner = %owner))]
    async fn fetch_tokens_by_owner(&self, owner: Address) -> Result<Vec<Address>, GatewayError> {
        let tokens = self
            .token_factory
            .getTokensByOwner(owner)
            .call()
            .await
            .map_err(|e| map_contract_error(&e))?;

        tracing::debug!(tokens_count = tokens.len(), "Fetched tokens by owner");

        Ok(tokens)
    }
}

fn map_transport_error(e: &TransportError) -> GatewayError {
    if e.is_user_rejection() {
        GatewayError::UserRejected
    } else if e.is_backend_unavailable() {
        GatewayError::Unavailable
    } else {
        GatewayError::Network(e.to_string())
    }
}

fn map_contract_error(e: &contract::Error) -> GatewayError {
    match e {
        contract::Error::TransportError(e) => map_transport_error(e),
        e => GatewayError::Network(e.to_string()),
    }
}

fn map_pending_transaction_error(e: &PendingTransactionError) -> GatewayError {
    match e {
        PendingTransactionError::TransportError(e) => map_transport_error(e),
        e => GatewayError::Network(e.to_string()),
    }
}
