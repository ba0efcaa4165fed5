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

pub const RPC_METHOD_LABEL: &str = "method";

/// A tower::Layer that counts RPC calls and transport failures per JSON-RPC
/// method. Both counters must have a single [`RPC_METHOD_LABEL`] label.
pub struct MetricsLayer {
    metric_requests_num_total: prometheus::IntCounterVec,
    metric_errors_num_total: prometheus::IntCounterVec,
}

impl MetricsLayer {
    pub fn new(
        metric_requests_num_total: prometheus::IntCounterVec,
        metric_errors_num_total: prometheus::IntCounterVec,
    ) -> Self {
        Self {
            metric_requests_num_total,
            metric_errors_num_total,
        }
    }
}

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService {
            inner,
            metric_requests_num_total: self.metric_requests_num_total.clone(),
            metric_errors_num_total: self.metric_errors_num_total.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsService<S> {
    inner: S,
    metric_requests_num_total: prometheus::IntCounterVec,
    metric_errors_num_total: prometheus::IntCounterVec,
}

impl<S> Service<RequestPacket> for MetricsService<S>
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
        // NOTE: A batch counts once per contained call
        let methods = req.method_names().map(ToString::to_string).collect::<Vec<_>>();
        for method in &methods {
            self.metric_requests_num_total
                .with_label_values(&[method.as_str()])
                .inc();
        }

        let fut = self.inner.call(req);
        let metric_errors_num_total = self.metric_errors_num_total.clone();

        Box::pin(async move {
            let res = fut.await;
            if res.is_err() {
                for method in &methods {
                    metric_errors_num_total
                        .with_label_values(&[method.as_str()])
                        .inc();
                }
            }
            res
        })
    }
}
