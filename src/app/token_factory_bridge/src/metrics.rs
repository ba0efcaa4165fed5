pub struct BridgeMetrics {
    pub rpc_requests_num_total: prometheus::IntCounterVec,
    pub rpc_errors_num_total: prometheus::IntCounterVec,
    pub token_creations_num_total: prometheus::IntCounterVec,
}

impl BridgeMetrics {
    pub fn new() -> Self {
        use prometheus::*;

        Self {
            rpc_requests_num_total: IntCounterVec::new(
                Opts::new("rpc_requests_num_total", "Blockchain node RPC requests executed"),
                &[alloy_ext::RPC_METHOD_LABEL],
            )
            .unwrap(),
            rpc_errors_num_total: IntCounterVec::new(
                Opts::new("rpc_errors_num_total", "Blockchain node RPC requests failed"),
                &[alloy_ext::RPC_METHOD_LABEL],
            )
            .unwrap(),
            token_creations_num_total: IntCounterVec::new(
                Opts::new(
                    "token_creations_num_total",
                    "Finished token creation attempts by outcome",
                ),
                &["outcome"],
            )
            .unwrap(),
        }
    }

    pub fn register(&self, reg: &prometheus::Registry) -> Result<(), prometheus::Error> {
        reg.register(Box::new(self.rpc_requests_num_total.clone()))?;
        reg.register(Box::new(self.rpc_errors_num_total.clone()))?;
        reg.register(Box::new(self.token_creations_num_total.clone()))?;
        Ok(())
    }
}
