mod alloy_wallet_gateway;

pub use alloy_wallet_gateway::*;
