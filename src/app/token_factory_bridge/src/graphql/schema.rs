use std::sync::Arc;

use async_graphql::EmptySubscription;
use token_factory::services::TransactionLifecycleTracker;

use crate::graphql::mutation::Mutation;
use crate::graphql::query::Query;

pub type Schema = async_graphql::Schema<Query, Mutation, EmptySubscription>;

pub fn build_schema(tracker: Arc<TransactionLifecycleTracker>) -> Schema {
    Schema::build(Query, Mutation, EmptySubscription)
        .extension(async_graphql::extensions::Tracing)
        .data(tracker)
        .finish()
}
