use std::sync::Arc;

use async_graphql::ErrorExtensions as _;
use token_factory::entities::{CreateTokenError, CreateTokenInput};
use token_factory::services::TransactionLifecycleTracker;

use crate::graphql::prelude::*;

pub struct Mutation;

#[Object]
impl Mutation {
    /// Creates a token and waits for the outcome. Progress is visible through
    /// the `transaction` query meanwhile.
    ///
    /// Fails without a payload while another creation is pending.
    async fn create_token(
        &self,
        ctx: &Context<'_>,
        name: String,
        symbol: String,
        supply: String,
    ) -> GqlResult<CreateTokenPayload> {
        let tracker = ctx.data::<Arc<TransactionLifecycleTracker>>()?;

        let outcome = tracker
            .create_token(CreateTokenInput::new(name, symbol, supply))
            .await;

        if let Err(e @ CreateTokenError::Busy) = &outcome {
            return Err(GqlError::new(e.to_string()).extend_with(|_, ext| ext.set("code", "BUSY")));
        }

        Ok(outcome.into())
    }
}
