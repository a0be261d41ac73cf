/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Filter directive used when `RUST_LOG` is unset. Model downloads and
    /// audio decoding are chatty, so their crates default to `warn`.
    pub default_filter: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            default_filter: "info,malacca=debug,hf_hub=warn,symphonia_core=warn".to_string(),
        }
    }
}
