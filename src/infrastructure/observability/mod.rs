mod init_tracing;
mod text_redaction;
mod tracing_config;

pub use init_tracing::init_tracing;
pub use text_redaction::{excerpt_for_log, redact_secrets};
pub use tracing_config::TracingConfig;
