pub mod app;
pub mod config;
pub mod graphql;
pub mod http_server;
pub mod metrics;

pub mod prelude {
    pub use crate::app::App;
    pub use crate::config::Config;
    pub use crate::metrics::BridgeMetrics;
}
