use std::{
    fmt::Debug,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use alloy::{
    rpc::json_rpc::{RequestPacket, ResponsePacket},
    transports::TransportError,
};
use tower::{Layer, Service};
use tracing::Instrument;

pub struct TracingLayer;

// A tower::Layer that wraps RPC calls with debug `EvmRpc::request` spans
// naming the called methods.
impl<S> Layer<S> for TracingLayer {
    type Service = TracingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TracingService { inner }
    }
}

#[derive(Debug, Clone)]
pub struct TracingService<S> {
    inner: S,
}

impl<S> Service<RequestPacket> for TracingService<S>
where
    S: Service<RequestPacket, Response = ResponsePacket, Error = TransportError>,
    S::Future: Send + 'static,
    S::Response: Send + 'static + Debug,
    S::Error: Send + 'static + Debug,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: RequestPacket) -> Self::Future {
        let methods = req.method_names().collect::<Vec<_>>().join(",");
        let span = tracing::debug_span!("EvmRpc::request", methods = %methods);

        let fut = self.inner.call(req);

        Box::pin(
            async move {
                let res = fut.await;
                if let Err(e) = &res {
                    tracing::debug!(error = %e, "RPC request failed");
                }
                res
            }
            .instrument(span),
        )
    }
}
