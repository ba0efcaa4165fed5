mod log_ext;
mod metrics;
mod rpc_error_ext;
mod tracing;

pub use crate::log_ext::*;
pub use crate::metrics::*;
pub use crate::rpc_error_ext::*;
pub use crate::tracing::*;

pub mod prelude {
    pub use crate::log_ext::LogExt;
    pub use crate::rpc_error_ext::RpcErrorExt;
}
