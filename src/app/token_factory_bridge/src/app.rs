use std::sync::Arc;

use async_trait::async_trait;
use color_eyre::eyre;
use serde_json::Value;
use token_factory::entities::{TransactionSnapshot, TransactionState};
use token_factory::services::TransactionLifecycleTracker;
use tokio::sync::broadcast;
use tracing::Instrument as _;

use crate::config::Config;
use crate::graphql;
use crate::http_server;
use crate::http_server::{HttpServeFuture, StateRequester};
use crate::metrics::BridgeMetrics;

const OUTCOME_SUCCEEDED: &str = "succeeded";

pub struct App {
    config: Config,
    tracker: Arc<TransactionLifecycleTracker>,

    metrics: BridgeMetrics,
    metrics_registry: prometheus::Registry,
}

#[async_trait]
impl StateRequester for TransactionLifecycleTracker {
    async fn request_as_json(&self) -> Value {
        let snapshot = self.snapshot();

        serde_json::json!({
            "transaction": serde_json::to_value(&snapshot)
                .unwrap_or_else(|e| Value::String(format!("Unserializable state: {e}"))),
            "cached_token_lists_count": self.cache().len(),
        })
    }
}

impl App {
    pub fn new(
        config: Config,
        tracker: Arc<TransactionLifecycleTracker>,
        metrics: BridgeMetrics,
        metrics_registry: prometheus::Registry,
    ) -> Self {
        Self {
            config,
            tracker,
            metrics,
            metrics_registry,
        }
    }

    pub async fn run<F>(&self, shutdown_requested: F) -> eyre::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Initialization
        self.init().instrument(tracing::info_span!("App::init")).await;

        let http_serve_future = self.build_http_server().await?;
        let http_server = http_serve_future.with_graceful_shutdown(shutdown_requested);

        // Asynchronous execution: HTTP server and outcome accounting
        tokio::select! {
            res = http_server => { res.map_err(Into::into) },
            res = track_transaction_outcomes(
                self.tracker.subscribe_finished_attempts(),
                &self.metrics,
            ) => { res },
        }
    }

    async fn build_http_server(&self) -> eyre::Result<HttpServeFuture> {
        let (http_server, local_addr) = http_server::build(
            self.config.http_address,
            self.config.http_port,
            self.metrics_registry.clone(),
            self.tracker.clone(),
            graphql::build_schema(self.tracker.clone()),
        )
        .await?;

        tracing::info!("HTTP API is listening on {local_addr}");

        Ok(http_server)
    }

    /// Warms the token list of the connected account. The node being
    /// unreachable at startup is not fatal: every request retries it.
    async fn init(&self) {
        let account = match self.tracker.current_account().await {
            Ok(Some(account)) => account,
            Ok(None) => {
                tracing::warn!("No account is available, token creation will fail until one is");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to resolve the current account");
                return;
            }
        };

        match self.tracker.list_tokens(account).await {
            Ok(tokens) => {
                tracing::info!(%account, tokens_count = tokens.len(), "Connected account");
            }
            Err(e) => {
                tracing::warn!(%account, error = %e, "Failed to load the token list");
            }
        }
    }
}

/// Counts finished attempts by outcome until the tracker is dropped.
pub async fn track_transaction_outcomes(
    mut finished_attempts: broadcast::Receiver<TransactionSnapshot>,
    metrics: &BridgeMetrics,
) -> eyre::Result<()> {
    loop {
        let snapshot = match finished_attempts.recv().await {
            Ok(snapshot) => snapshot,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Finished attempts skipped by outcome accounting");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };

        let outcome = match &snapshot.state {
            TransactionState::Succeeded(_) => OUTCOME_SUCCEEDED,
            TransactionState::Failed(e) => e.kind().as_str(),
            TransactionState::Idle | TransactionState::Pending { .. } => continue,
        };

        metrics
            .token_creations_num_total
            .with_label_values(&[outcome])
            .inc();
    }

    Ok(())
}
