use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use alloy::primitives::{Address, TxHash, address};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use token_factory::entities::{GatewayError, TokenCreationRequest, TokenRecord};
use token_factory::services::{MockWalletGateway, TokenListCache, TokenListLoader, WalletGateway};
use tokio::sync::Notify;

const ACCOUNT: Address = address!("0x1010101010101010101010101010101010101010");
const TOKEN_A: Address = address!("0x2020202020202020202020202020202020202020");
const TOKEN_B: Address = address!("0x3030303030303030303030303030303030303030");

#[tokio::test]
async fn test_failed_fetch_is_not_cached() {
    let mut mock_gateway = MockWalletGateway::new();
    let mut calls = 0;
    mock_gateway
        .expect_fetch_tokens_by_owner()
        .times(2)
        .returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(GatewayError::Network("connection reset".to_string()))
            } else {
                Ok(vec![TOKEN_A])
            }
        });

    let loader = TokenListLoader::new(Arc::new(mock_gateway), Arc::new(TokenListCache::new()));

    let e = loader.list_tokens(ACCOUNT).await.unwrap_err();
    assert_eq!(GatewayError::Network("connection reset".to_string()), e);
    assert_eq!(None, loader.cache().get(ACCOUNT));

    assert_eq!(
        vec![TokenRecord::from_address(TOKEN_A)],
        loader.list_tokens(ACCOUNT).await.unwrap()
    );
    assert_eq!(
        Some(vec![TokenRecord::from_address(TOKEN_A)]),
        loader.cache().get(ACCOUNT)
    );
}

#[tokio::test]
async fn test_fetch_invalidated_in_flight_is_not_stored() {
    let gateway = Arc::new(SteppedFetchGateway::new());
    let loader = TokenListLoader::new(gateway.clone(), Arc::new(TokenListCache::new()));

    let stale_fetch = tokio::spawn({
        let loader = loader.clone();
        async move { loader.list_tokens(ACCOUNT).await }
    });

    gateway.fetch_started.notified().await;
    loader.invalidate(ACCOUNT);
    gateway.release_fetch.notify_one();

    // NOTE: The caller that asked before the invalidation still gets its answer ...
    assert_eq!(
        vec![TokenRecord::from_address(TOKEN_A)],
        stale_fetch.await.unwrap().unwrap()
    );
    // ... but it is not kept
    assert_eq!(None, loader.cache().get(ACCOUNT));

    gateway.release_fetch.notify_one();
    assert_eq!(
        vec![TokenRecord::from_address(TOKEN_B)],
        loader.list_tokens(ACCOUNT).await.unwrap()
    );
    assert_eq!(2, gateway.fetch_calls.load(Ordering::SeqCst));
}

/// Every fetch announces itself through `fetch_started` and then waits for
/// `release_fetch`. The first fetch returns [`TOKEN_A`], later ones
/// [`TOKEN_B`].
struct SteppedFetchGateway {
    fetch_started: Notify,
    release_fetch: Notify,
    fetch_calls: AtomicUsize,
}

impl SteppedFetchGateway {
    fn new() -> Self {
        Self {
            fetch_started: Notify::new(),
            release_fetch: Notify::new(),
            fetch_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl WalletGateway for SteppedFetchGateway {
    async fn current_account(&self) -> Result<Option<Address>, GatewayError> {
        unreachable!()
    }

    async fn submit_create_token(
        &self,
        _from: Address,
        _request: TokenCreationRequest,
    ) -> Result<TxHash, GatewayError> {
        unreachable!()
    }

    async fn wait_for_token_created(&self, _tx_hash: TxHash) -> Result<Address, GatewayError> {
        unreachable!()
    }

    async fn fetch_tokens_by_owner(&self, _owner: Address) -> Result<Vec<Address>, GatewayError> {
        let call_index = self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetch_started.notify_one();
        self.release_fetch.notified().await;

        if call_index == 0 {
            Ok(vec![TOKEN_A])
        } else {
            Ok(vec![TOKEN_B])
        }
    }
}
