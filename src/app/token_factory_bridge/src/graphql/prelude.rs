pub use async_graphql::{Context, Error as GqlError, Object, Result as GqlResult, SimpleObject};

pub use crate::graphql::types::*;
