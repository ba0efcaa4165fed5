use std::sync::Arc;

use alloy::primitives::Address;
use token_factory::services::TransactionLifecycleTracker;

use crate::graphql::prelude::*;

pub struct Query;

#[Object]
impl Query {
    /// Returns API version information
    async fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Account the wallet currently acts as
    async fn account(&self, ctx: &Context<'_>) -> GqlResult<Option<String>> {
        let tracker = ctx.data::<Arc<TransactionLifecycleTracker>>()?;
        let account = tracker.current_account().await?;

        Ok(account.map(|account| account.to_string()))
    }

    /// State of the latest token creation
    async fn transaction(&self, ctx: &Context<'_>) -> GqlResult<TransactionStatus> {
        let tracker = ctx.data::<Arc<TransactionLifecycleTracker>>()?;

        Ok(tracker.snapshot().into())
    }

    /// Tokens created by `owner`, or by the current account when omitted
    async fn tokens(&self, ctx: &Context<'_>, owner: Option<String>) -> GqlResult<Vec<Token>> {
        let tracker = ctx.data::<Arc<TransactionLifecycleTracker>>()?;

        let owner = match owner {
            Some(owner) => owner
                .parse::<Address>()
                .map_err(|e| GqlError::new(format!("Invalid owner address: {e}")))?,
            None => match tracker.current_account().await? {
                Some(account) => account,
                None => return Ok(Vec::new()),
            },
        };

        let tokens = tracker.list_tokens(owner).await?;

        Ok(tokens.into_iter().map(Into::into).collect())
    }
}
