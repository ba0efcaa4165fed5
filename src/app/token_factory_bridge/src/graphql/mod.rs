pub mod handlers;
pub mod mutation;
pub mod prelude;
pub mod query;
pub mod schema;
pub mod types;

pub use handlers::router;
pub use schema::{Schema, build_schema};
