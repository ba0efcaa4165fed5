use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use color_eyre::eyre;

use crate::graphql;

const HTTP_GRAPHQL_ENDPOINT: &str = "/graphql";

pub type HttpServeFuture = axum::serve::Serve<
    tokio::net::TcpListener,
    axum::routing::IntoMakeService<axum::Router>,
    axum::Router,
>;

#[async_trait]
pub trait StateRequester: Send + Sync {
    async fn request_as_json(&self) -> serde_json::Value;
}

pub async fn build(
    address: std::net::IpAddr,
    http_port: u16,
    metrics_reg: prometheus::Registry,
    state_requester: Arc<dyn StateRequester>,
    graphql_schema: graphql::Schema,
) -> eyre::Result<(HttpServeFuture, SocketAddr)> {
    let app = axum::Router::new()
        .route("/system/health", axum::routing::get(health_handler))
        .route("/system/metrics", axum::routing::get(metrics_handler))
        .route("/system/state", axum::routing::get(state_handler))
        .merge(graphql::router(HTTP_GRAPHQL_ENDPOINT))
        .fallback(unknown_fallback_handler)
        .layer(axum::extract::Extension(metrics_reg))
        .layer(axum::extract::Extension(state_requester))
        .layer(axum::extract::Extension(graphql_schema));

    let addr = std::net::SocketAddr::from((address, http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let server = axum::serve(listener, app.into_make_service());
    Ok((server, local_addr))
}

pub async fn health_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "ok": true }))
}

pub async fn metrics_handler(
    axum::extract::Extension(metrics_reg): axum::extract::Extension<prometheus::Registry>,
) -> Result<String, axum::http::StatusCode> {
    let encoder = prometheus::TextEncoder::new();

    encoder
        .encode_to_string(&metrics_reg.gather())
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to encode metrics");
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })
}

pub async fn state_handler(
    axum::extract::Extension(state_requester): axum::extract::Extension<Arc<dyn StateRequester>>,
) -> axum::Json<serde_json::Value> {
    let state_json = state_requester.request_as_json().await;

    axum::Json(state_json)
}

pub async fn unknown_fallback_handler(uri: axum::http::Uri) -> axum::http::StatusCode {
    tracing::debug!(%uri, "Unknown route");

    axum::http::StatusCode::NOT_FOUND
}
