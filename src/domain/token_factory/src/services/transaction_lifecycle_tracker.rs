use std::sync::{Arc, OnceLock};
use std::time::Duration;

use alloy::primitives::Address;
use tokio::sync::{broadcast, watch};
use tracing::Instrument as _;

use crate::entities::*;
use crate::services::{TokenListCache, TokenListLoader, WalletGateway};

const FINISHED_ATTEMPTS_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub token_decimals: u8,
    /// How long to wait for the wallet before giving up locally. `None`
    /// waits indefinitely.
    pub submission_timeout: Option<Duration>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            token_decimals: DEFAULT_TOKEN_DECIMALS,
            submission_timeout: None,
        }
    }
}

/// Drives token creation through `Idle -> Pending -> Succeeded | Failed`
/// and keeps the per-account token lists consistent with it.
///
/// Only one creation may be pending at a time: a second request made while
/// one is pending is rejected with [`CreateTokenError::Busy`]. Failed
/// attempts are never retried automatically.
///
/// The token list cache is created with the tracker and dropped with it.
pub struct TransactionLifecycleTracker {
    gateway: Arc<dyn WalletGateway>,
    token_list_loader: TokenListLoader,
    snapshot: watch::Sender<TransactionSnapshot>,
    finished_attempts: broadcast::Sender<TransactionSnapshot>,
    config: TrackerConfig,
}

impl TransactionLifecycleTracker {
    pub fn new(gateway: Arc<dyn WalletGateway>, config: TrackerConfig) -> Self {
        let cache = Arc::new(TokenListCache::new());
        let token_list_loader = TokenListLoader::new(gateway.clone(), cache);

        Self {
            gateway,
            token_list_loader,
            snapshot: watch::Sender::new(TransactionSnapshot::default()),
            finished_attempts: broadcast::Sender::new(FINISHED_ATTEMPTS_CAPACITY),
            config,
        }
    }

    pub fn current_state(&self) -> TransactionState {
        self.snapshot.borrow().state.clone()
    }

    pub fn snapshot(&self) -> TransactionSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Every state change is published to the returned receiver.
    pub fn subscribe(&self) -> watch::Receiver<TransactionSnapshot> {
        self.snapshot.subscribe()
    }

    /// Every attempt that reaches a terminal state is published exactly
    /// once, unlike [`Self::subscribe()`] which may skip intermediate
    /// states. Rejected `Busy` requests start no attempt and are not
    /// published.
    pub fn subscribe_finished_attempts(&self) -> broadcast::Receiver<TransactionSnapshot> {
        self.finished_attempts.subscribe()
    }

    pub fn cache(&self) -> &TokenListCache {
        self.token_list_loader.cache()
    }

    pub async fn current_account(&self) -> Result<Option<Address>, GatewayError> {
        self.gateway.current_account().await
    }

    pub async fn list_tokens(&self, account: Address) -> Result<Vec<TokenRecord>, GatewayError> {
        self.token_list_loader.list_tokens(account).await
    }

    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(name = %input.name, symbol = %input.symbol, supply = %input.supply)
    )]
    pub async fn create_token(
        &self,
        input: CreateTokenInput,
    ) -> Result<TokenRecord, CreateTokenError> {
        let (attempt, request) = self.begin_attempt(&input)?;

        let acting_account = OnceLock::new();
        let mut pending_guard = PendingAttemptGuard {
            tracker: self,
            attempt,
            acting_account: &acting_account,
            armed: true,
        };

        let submission = self.submit_and_wait(attempt, request, &acting_account);
        let outcome = match self.config.submission_timeout {
            Some(limit) => tokio::time::timeout(limit, submission)
                .await
                .unwrap_or(Err(CreateTokenError::Timeout(limit))),
            None => submission.await,
        };

        match &outcome {
            Ok(token) => {
                // NOTE: Invalidate before publishing success, so that anyone
                //       reacting to it reads the updated list.
                if let Some(account) = acting_account.get() {
                    self.token_list_loader.invalidate(*account);
                }
                self.finish_attempt(attempt, TransactionState::Succeeded(token.clone()));

                tracing::info!(token_address = %token.address, "Token created");

                if let Some(account) = acting_account.get() {
                    self.spawn_token_list_refresh(*account);
                }
            }
            Err(e) => {
                if let (CreateTokenError::Timeout(_), Some(account)) = (e, acting_account.get()) {
                    // NOTE: The wallet may still complete the transaction,
                    //       so the next read has to go to the chain.
                    self.token_list_loader.invalidate(*account);
                }
                self.finish_attempt(attempt, TransactionState::Failed(e.clone()));

                tracing::warn!(error = %e, "Token creation failed");
            }
        }

        pending_guard.armed = false;

        outcome
    }

    fn begin_attempt(
        &self,
        input: &CreateTokenInput,
    ) -> Result<(u64, TokenCreationRequest), CreateTokenError> {
        let mut result = Err(CreateTokenError::Busy);
        let mut rejected_snapshot = None;

        self.snapshot.send_if_modified(|snapshot| {
            if snapshot.state.is_pending() {
                return false;
            }

            snapshot.attempt += 1;
            match input.validate(self.config.token_decimals) {
                Ok(request) => {
                    snapshot.state = TransactionState::Pending { tx_hash: None };
                    result = Ok((snapshot.attempt, request));
                }
                Err(e) => {
                    let e = CreateTokenError::from(e);
                    snapshot.state = TransactionState::Failed(e.clone());
                    rejected_snapshot = Some(snapshot.clone());
                    result = Err(e);
                }
            }

            true
        });

        match &result {
            Ok((attempt, _)) => tracing::debug!(attempt, "Token creation attempt started"),
            Err(CreateTokenError::Busy) => {
                tracing::warn!("Reject token creation: another one is pending");
            }
            Err(e) => tracing::info!(error = %e, "Reject invalid token creation"),
        }

        if let Some(snapshot) = rejected_snapshot {
            self.publish_finished_attempt(snapshot);
        }

        result
    }

    async fn submit_and_wait(
        &self,
        attempt: u64,
        request: TokenCreationRequest,
        acting_account: &OnceLock<Address>,
    ) -> Result<TokenRecord, CreateTokenError> {
        let account = self
            .gateway
            .current_account()
            .await?
            .ok_or(CreateTokenError::GatewayUnavailable)?;
        let account = *acting_account.get_or_init(|| account);

        tracing::info!(%account, "Submitting token creation");

        let tx_hash = self
            .gateway
            .submit_create_token(account, request.clone())
            .await?;

        tracing::info!(%tx_hash, "Token creation submitted");

        self.update_attempt(
            attempt,
            TransactionState::Pending {
                tx_hash: Some(tx_hash),
            },
        );

        let token_address = self.gateway.wait_for_token_created(tx_hash).await?;

        Ok(TokenRecord::new(
            request.name,
            request.symbol,
            token_address,
        ))
    }

    fn finish_attempt(&self, attempt: u64, state: TransactionState) {
        debug_assert!(state.is_terminal());

        if self.update_attempt(attempt, state.clone()) {
            self.publish_finished_attempt(TransactionSnapshot { attempt, state });
        }
    }

    fn publish_finished_attempt(&self, snapshot: TransactionSnapshot) {
        // NOTE: Sending fails only when nobody subscribed
        let _ = self.finished_attempts.send(snapshot);
    }

    fn update_attempt(&self, attempt: u64, state: TransactionState) -> bool {
        let updated = self.snapshot.send_if_modified(|snapshot| {
            if snapshot.attempt != attempt {
                return false;
            }

            snapshot.state = state;
            true
        });

        if !updated {
            tracing::debug!(attempt, "Ignore update of a superseded attempt");
        }

        updated
    }

    fn spawn_token_list_refresh(&self, account: Address) {
        let token_list_loader = self.token_list_loader.clone();

        tokio::spawn(
            async move {
                if let Err(e) = token_list_loader.list_tokens(account).await {
                    tracing::warn!(error = %e, "Token list refresh failed");
                }
            }
            .instrument(tracing::debug_span!("TokenListRefresh", %account)),
        );
    }
}

/// Marks the attempt as cancelled if `create_token()` is dropped before it
/// reaches a terminal state.
///
/// The transaction may already be in the wallet's hands by then, so the
/// acting account's token list is invalidated as well.
struct PendingAttemptGuard<'a> {
    tracker: &'a TransactionLifecycleTracker,
    attempt: u64,
    acting_account: &'a OnceLock<Address>,
    armed: bool,
}

impl Drop for PendingAttemptGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        // NOTE: Invalidate before releasing the attempt, so that anyone
        //       reacting to the cancellation reads from the chain.
        if let Some(account) = self.acting_account.get() {
            self.tracker.token_list_loader.invalidate(*account);
        }

        let attempt = self.attempt;
        let cancelled = self.tracker.snapshot.send_if_modified(|snapshot| {
            if snapshot.attempt != attempt || !snapshot.state.is_pending() {
                return false;
            }

            snapshot.state = TransactionState::Failed(CreateTokenError::Cancelled);
            true
        });

        if !cancelled {
            return;
        }

        tracing::warn!(attempt, "Token creation abandoned while pending");

        self.tracker.publish_finished_attempt(TransactionSnapshot {
            attempt,
            state: TransactionState::Failed(CreateTokenError::Cancelled),
        });
    }
}
