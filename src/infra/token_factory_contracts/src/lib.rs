use alloy::sol;

sol!(
    #[sol(rpc)]
    TokenFactory,
    "abis/TokenFactory.json"
);

pub mod prelude {
    pub use alloy::sol_types::SolEvent;
}
