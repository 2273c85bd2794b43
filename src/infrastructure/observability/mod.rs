mod init_tracing;
mod log_excerpt;
mod tracing_config;

pub use init_tracing::init_tracing;
pub use log_excerpt::log_excerpt;
pub use tracing_config::TracingConfig;
