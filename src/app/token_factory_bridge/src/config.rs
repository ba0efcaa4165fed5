use std::net::IpAddr;

use alloy::primitives::Address;

#[derive(confique::Config, Debug)]
pub struct Config {
    #[config(env = "RPC_URL", default = "http://localhost:8545")]
    pub rpc_url: String,

    #[config(env = "TOKEN_FACTORY_CONTRACT_ADDRESS")]
    pub token_factory_contract_address: Address,
    /// Decimals of the tokens deployed by the factory: the entered supply is
    /// scaled by them.
    #[config(env = "TOKEN_DECIMALS", default = 18)]
    pub token_decimals: u8,

    /// How long to wait for the wallet to finish a token creation. `0`
    /// waits indefinitely.
    #[config(env = "TRANSACTION_TIMEOUT_IN_SECS", default = 600)]
    pub transaction_timeout_in_secs: u64,
    #[config(env = "TRANSACTION_REQUIRED_CONFIRMATIONS", default = 1)]
    pub transaction_required_confirmations: u64,

    #[config(env = "HTTP_ADDRESS", default = "127.0.0.1")]
    pub http_address: IpAddr,
    #[config(env = "HTTP_PORT", default = 3001)]
    pub http_port: u16,
}

impl Config {
    pub fn builder() -> confique::Builder<Config> {
        confique::Config::builder()
    }

    pub fn transaction_timeout(&self) -> Option<std::time::Duration> {
        (self.transaction_timeout_in_secs > 0)
            .then(|| std::time::Duration::from_secs(self.transaction_timeout_in_secs))
    }
}
