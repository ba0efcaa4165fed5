use std::collections::HashMap;
use std::sync::Mutex;

use alloy::primitives::Address;

use crate::entities::TokenRecord;

/// Token lists by owner account, kept for the lifetime of the owning
/// tracker.
///
/// Entries are never evicted, only invalidated, so memory grows with the
/// number of distinct accounts queried.
///
/// Every invalidation bumps the account's generation. A fetch remembers the
/// generation it started at and stores its result through
/// [`Self::put_if_generation`], which refuses lists that were invalidated
/// while in flight.
#[derive(Debug, Default)]
pub struct TokenListCache {
    state: Mutex<TokenListCacheState>,
}

#[derive(Debug, Default)]
struct TokenListCacheState {
    entries: HashMap<Address, Vec<TokenRecord>>,
    generations: HashMap<Address, u64>,
}

impl TokenListCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, account: Address) -> Option<Vec<TokenRecord>> {
        let state = self.state.lock().unwrap();
        state.entries.get(&account).cloned()
    }

    pub fn put(&self, account: Address, tokens: Vec<TokenRecord>) {
        let mut state = self.state.lock().unwrap();
        state.entries.insert(account, tokens);
    }

    /// Returns `true` if an entry was removed.
    pub fn invalidate(&self, account: Address) -> bool {
        let mut state = self.state.lock().unwrap();
        *state.generations.entry(account).or_default() += 1;
        state.entries.remove(&account).is_some()
    }

    pub fn generation(&self, account: Address) -> u64 {
        let state = self.state.lock().unwrap();
        state.generations.get(&account).copied().unwrap_or_default()
    }

    /// Stores `tokens` only if `account` was not invalidated since
    /// `generation` was read.
    pub fn put_if_generation(
        &self,
        account: Address,
        generation: u64,
        tokens: Vec<TokenRecord>,
    ) -> bool {
        let mut state = self.state.lock().unwrap();
        let current_generation = state.generations.get(&account).copied().unwrap_or_default();
        if current_generation != generation {
            return false;
        }

        state.entries.insert(account, tokens);
        true
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
