mod token_list_cache;
mod token_list_loader;
mod transaction_lifecycle_tracker;
mod wallet_gateway;

pub use token_list_cache::*;
pub use token_list_loader::*;
pub use transaction_lifecycle_tracker::*;
pub use wallet_gateway::*;
