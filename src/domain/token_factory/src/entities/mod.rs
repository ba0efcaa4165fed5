mod create_token_input;
mod errors;
mod token_record;
mod transaction_state;

pub use create_token_input::*;
pub use errors::*;
pub use token_record::*;
pub use transaction_state::*;
