//! Logging configuration.

use std::env;

/// Output format for log lines
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Configuration for the tracing subscriber
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `sesame3_proxy=debug,actix_web=info`
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let filter = env::var("RUST_LOG")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        let format = match env::var("LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self { filter, format }
    }
}
