use std::path::PathBuf;
use std::sync::Arc;

use alloy::providers::{DynProvider, Provider};
use alloy::rpc::client::ClientBuilder;
use alloy_ext::{MetricsLayer, TracingLayer};
use clap::Parser;
use color_eyre::eyre;
use dotenv::dotenv;
use token_factory::services::{TrackerConfig, TransactionLifecycleTracker};
use token_factory_bridge::prelude::*;
use token_factory_wallet::services::AlloyWalletGateway;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const BINARY_NAME: &str = env!("CARGO_PKG_NAME");
const DEFAULT_RUST_LOG: &str =
    "debug,alloy_transport_http=info,alloy_rpc_client=info,reqwest=info,hyper=info,h2=info";

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the YAML config file. Environment variables take precedence.
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // NOTE: A missing `.env` is fine, variables may come from the environment
    dotenv().ok();

    let args = Args::parse();

    init_tls();

    init_observability();

    let config = Config::builder().env().file(&args.config).load()?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    rt.block_on(main_async(config))
}

async fn main_async(config: Config) -> eyre::Result<()> {
    let metrics = BridgeMetrics::new();
    let metrics_registry = prometheus::Registry::new();
    metrics.register(&metrics_registry)?;

    let provider = build_rpc_client(&config, &metrics)?;
    let chain_id = provider.get_chain_id().await?;

    let wallet_gateway = Arc::new(AlloyWalletGateway::new(
        provider,
        config.token_factory_contract_address,
        config.transaction_required_confirmations,
    ));
    let tracker = Arc::new(TransactionLifecycleTracker::new(
        wallet_gateway,
        TrackerConfig {
            token_decimals: config.token_decimals,
            submission_timeout: config.transaction_timeout(),
        },
    ));

    let app = App::new(config, tracker, metrics, metrics_registry);

    tracing::info!(version = VERSION, chain_id, "Running {BINARY_NAME}");

    app.run(shutdown_requested()).await?;

    Ok(())
}

fn build_rpc_client(config: &Config, metrics: &BridgeMetrics) -> eyre::Result<DynProvider> {
    let client = ClientBuilder::default()
        .layer(TracingLayer)
        .layer(MetricsLayer::new(
            metrics.rpc_requests_num_total.clone(),
            metrics.rpc_errors_num_total.clone(),
        ))
        .http(config.rpc_url.parse()?);

    let provider = alloy::providers::ProviderBuilder::new()
        .connect_client(client)
        .erased();

    Ok(provider)
}

async fn shutdown_requested() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal");
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown requested");
}

fn init_tls() {
    // NOTE: alloy's reqwest transport pulls `rustls` without choosing a crypto
    //       backend, so the process has to install one.
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .expect("Could not install default TLS provider");
}

fn init_observability() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_RUST_LOG)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Redirect panics to tracing
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "Panicked");
        default_hook(info);
    }));
}
