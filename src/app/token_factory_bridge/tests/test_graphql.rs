use std::sync::Arc;

use alloy::primitives::{Address, TxHash, address, b256};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use token_factory::entities::{GatewayError, TokenCreationRequest};
use token_factory::services::{
    MockWalletGateway,
    TrackerConfig,
    TransactionLifecycleTracker,
    WalletGateway,
};
use token_factory_bridge::graphql;
use tokio::sync::Notify;

const ACCOUNT: Address = address!("0x1010101010101010101010101010101010101010");
const EXISTING_TOKEN: Address = address!("0x2020202020202020202020202020202020202020");
const CREATED_TOKEN: Address = address!("0x0000000000000000000000000000000000000abc");
const TX_HASH: TxHash =
    b256!("0x00000000000000000000000000000000000000000000000000000000000000ff");

#[tokio::test]
async fn test_transaction_is_idle_initially() {
    let harness = GraphQLHarness::new(MockWalletGateway::new());

    let response = harness
        .execute("{ transaction { attempt stage txHash token { address } failureKind } }")
        .await;

    assert_eq!(
        json!({
            "transaction": {
                "attempt": 0,
                "stage": "IDLE",
                "txHash": null,
                "token": null,
                "failureKind": null,
            }
        }),
        response
    );
}

#[tokio::test]
async fn test_invalid_create_token_is_reported_without_wallet_calls() {
    let harness = GraphQLHarness::new(MockWalletGateway::new());

    let response = harness
        .execute(
            r#"mutation { createToken(name: "Test", symbol: "", supply: "1000") { token { address } failureKind failureMessage } }"#,
        )
        .await;
    assert_eq!(
        json!({
            "createToken": {
                "token": null,
                "failureKind": "VALIDATION",
                "failureMessage": "Symbol is required",
            }
        }),
        response
    );

    let response = harness
        .execute("{ transaction { attempt stage failureKind } }")
        .await;
    assert_eq!(
        json!({
            "transaction": {
                "attempt": 1,
                "stage": "FAILED",
                "failureKind": "VALIDATION",
            }
        }),
        response
    );
}

#[tokio::test]
async fn test_create_token_then_list_tokens() {
    let mut mock_gateway = MockWalletGateway::new();
    mock_gateway
        .expect_current_account()
        .returning(|| Ok(Some(ACCOUNT)));
    mock_gateway
        .expect_submit_create_token()
        .times(1)
        .returning(|_, _| Ok(TX_HASH));
    mock_gateway
        .expect_wait_for_token_created()
        .times(1)
        .returning(|_| Ok(CREATED_TOKEN));
    mock_gateway
        .expect_fetch_tokens_by_owner()
        .returning(|_| Ok(vec![EXISTING_TOKEN, CREATED_TOKEN]));
    let harness = GraphQLHarness::new(mock_gateway);

    let response = harness
        .execute(
            r#"mutation { createToken(name: "Test", symbol: "TST", supply: "1000") { token { name symbol address } failureKind } }"#,
        )
        .await;
    assert_eq!(
        json!({
            "createToken": {
                "token": {
                    "name": "Test",
                    "symbol": "TST",
                    "address": CREATED_TOKEN.to_string(),
                },
                "failureKind": null,
            }
        }),
        response
    );

    let response = harness.execute("{ tokens { address } }").await;
    assert_eq!(
        json!({
            "tokens": [
                { "address": EXISTING_TOKEN.to_string() },
                { "address": CREATED_TOKEN.to_string() },
            ]
        }),
        response
    );
}

#[tokio::test]
async fn test_user_rejection_is_reported() {
    let mut mock_gateway = MockWalletGateway::new();
    mock_gateway
        .expect_current_account()
        .returning(|| Ok(Some(ACCOUNT)));
    mock_gateway
        .expect_submit_create_token()
        .times(1)
        .returning(|_, _| Err(GatewayError::UserRejected));
    let harness = GraphQLHarness::new(mock_gateway);

    let response = harness
        .execute(
            r#"mutation { createToken(name: "Test", symbol: "TST", supply: "1000") { token { address } failureKind } }"#,
        )
        .await;

    assert_eq!(
        json!({
            "createToken": {
                "token": null,
                "failureKind": "USER_REJECTED",
            }
        }),
        response
    );
}

#[tokio::test]
async fn test_invalid_owner_address_is_an_error() {
    let harness = GraphQLHarness::new(MockWalletGateway::new());

    let response = harness
        .schema
        .execute(r#"{ tokens(owner: "not-an-address") { address } }"#)
        .await;

    assert_eq!(1, response.errors.len());
    assert!(
        response.errors[0]
            .message
            .starts_with("Invalid owner address"),
        "{}",
        response.errors[0].message
    );
}

#[tokio::test]
async fn test_create_token_while_pending_is_busy_error() {
    let gateway = Arc::new(FinalizeOnDemandGateway::new());
    let harness = GraphQLHarness::with_gateway(gateway.clone());
    const CREATE_TOKEN: &str = r#"mutation { createToken(name: "Test", symbol: "TST", supply: "1000") { token { address } failureKind } }"#;

    let first_creation = tokio::spawn({
        let schema = harness.schema.clone();
        async move { schema.execute(CREATE_TOKEN).await }
    });
    harness
        .tracker
        .subscribe()
        .wait_for(|snapshot| snapshot.state.is_pending())
        .await
        .unwrap();

    let response = harness.schema.execute(CREATE_TOKEN).await;
    let response = serde_json::to_value(&response).unwrap();

    assert_eq!(json!(null), response["data"]);
    assert_eq!(1, response["errors"].as_array().unwrap().len());
    assert_eq!(json!("BUSY"), response["errors"][0]["extensions"]["code"]);

    gateway.finalize();
    let first_response = first_creation.await.unwrap();
    assert!(first_response.errors.is_empty(), "{:?}", first_response.errors);
    assert_eq!(
        json!({
            "createToken": {
                "token": { "address": CREATED_TOKEN.to_string() },
                "failureKind": null,
            }
        }),
        first_response.data.into_json().unwrap()
    );
}

struct GraphQLHarness {
    schema: graphql::Schema,
    tracker: Arc<TransactionLifecycleTracker>,
}

impl GraphQLHarness {
    fn new(mock_gateway: MockWalletGateway) -> Self {
        Self::with_gateway(Arc::new(mock_gateway))
    }

    fn with_gateway(gateway: Arc<dyn WalletGateway>) -> Self {
        let tracker = Arc::new(TransactionLifecycleTracker::new(
            gateway,
            TrackerConfig::default(),
        ));

        Self {
            schema: graphql::build_schema(tracker.clone()),
            tracker,
        }
    }

    async fn execute(&self, query: &str) -> serde_json::Value {
        let response = self.schema.execute(query).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        response.data.into_json().unwrap()
    }
}

/// Acts as [`ACCOUNT`]; a submitted creation stays pending until
/// [`FinalizeOnDemandGateway::finalize()`] is called.
struct FinalizeOnDemandGateway {
    finalization: Notify,
}

impl FinalizeOnDemandGateway {
    fn new() -> Self {
        Self {
            finalization: Notify::new(),
        }
    }

    fn finalize(&self) {
        self.finalization.notify_one();
    }
}

#[async_trait]
impl WalletGateway for FinalizeOnDemandGateway {
    async fn current_account(&self) -> Result<Option<Address>, GatewayError> {
        Ok(Some(ACCOUNT))
    }

    async fn submit_create_token(
        &self,
        _from: Address,
        _request: TokenCreationRequest,
    ) -> Result<TxHash, GatewayError> {
        Ok(TX_HASH)
    }

    async fn wait_for_token_created(&self, _tx_hash: TxHash) -> Result<Address, GatewayError> {
        self.finalization.notified().await;
        Ok(CREATED_TOKEN)
    }

    async fn fetch_tokens_by_owner(&self, _owner: Address) -> Result<Vec<Address>, GatewayError> {
        Ok(vec![CREATED_TOKEN])
    }
}
