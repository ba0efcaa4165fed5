use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy::primitives::Address;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use crate::entities::{GatewayError, TokenRecord};
use crate::services::{TokenListCache, WalletGateway};

type SharedTokenListFetch = Shared<BoxFuture<'static, Result<Vec<TokenRecord>, GatewayError>>>;

struct InFlightFetch {
    generation: u64,
    fetch: SharedTokenListFetch,
}

/// Read-through access to owner token lists.
///
/// Callers asking for the same account while its list is being fetched
/// await the same request instead of starting their own.
#[derive(Clone)]
pub struct TokenListLoader {
    gateway: Arc<dyn WalletGateway>,
    cache: Arc<TokenListCache>,
    in_flight: Arc<Mutex<HashMap<Address, InFlightFetch>>>,
}

impl TokenListLoader {
    pub fn new(gateway: Arc<dyn WalletGateway>, cache: Arc<TokenListCache>) -> Self {
        Self {
            gateway,
            cache,
            in_flight: Default::default(),
        }
    }

    pub fn cache(&self) -> &TokenListCache {
        &self.cache
    }

    #[tracing::instrument(level = "debug", skip_all, fields(account = %account))]
    pub async fn list_tokens(&self, account: Address) -> Result<Vec<TokenRecord>, GatewayError> {
        let fetch = {
            let mut in_flight = self.in_flight.lock().unwrap();

            if let Some(tokens) = self.cache.get(account) {
                tracing::debug!(tokens_count = tokens.len(), "Token list served from cache");
                return Ok(tokens);
            }

            let generation = self.cache.generation(account);
            match in_flight.get(&account) {
                Some(pending) if pending.generation == generation => {
                    tracing::debug!("Joining in-flight token list fetch");
                    pending.fetch.clone()
                }
                _ => {
                    let fetch = self.start_fetch(account, generation);
                    in_flight.insert(
                        account,
                        InFlightFetch {
                            generation,
                            fetch: fetch.clone(),
                        },
                    );
                    fetch
                }
            }
        };

        fetch.await
    }

    /// Drops the cached list so that the next read goes to the gateway.
    /// Fetches already in flight keep running but their results are not
    /// stored.
    pub fn invalidate(&self, account: Address) {
        let removed = self.cache.invalidate(account);

        tracing::debug!(%account, removed, "Token list invalidated");
    }

    fn start_fetch(&self, account: Address, generation: u64) -> SharedTokenListFetch {
        let gateway = self.gateway.clone();
        let cache = self.cache.clone();
        let in_flight = self.in_flight.clone();

        async move {
            let result = gateway
                .fetch_tokens_by_owner(account)
                .await
                .map(|addresses| {
                    addresses
                        .into_iter()
                        .map(TokenRecord::from_address)
                        .collect::<Vec<_>>()
                });

            match &result {
                Ok(tokens) => {
                    if !cache.put_if_generation(account, generation, tokens.clone()) {
                        tracing::debug!(%account, "Discard token list invalidated while in flight");
                    }
                }
                Err(e) => {
                    tracing::warn!(%account, error = %e, "Token list fetch failed");
                }
            }

            {
                let mut in_flight = in_flight.lock().unwrap();
                if in_flight
                    .get(&account)
                    .is_some_and(|pending| pending.generation == generation)
                {
                    in_flight.remove(&account);
                }
            }

            result
        }
        .boxed()
        .shared()
    }
}
