//! Tracing subscriber setup.

use crate::config::{LogFormat, LoggingConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Returns an error if a subscriber is already installed (tests, embedding).
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()?,
    }

    info!(
        service_name = env!("CARGO_PKG_NAME"),
        service_version = env!("CARGO_PKG_VERSION"),
        format = ?config.format,
        "Tracing initialized"
    );

    Ok(())
}

/// Fields describing an inbound request, shared by the request log lines
pub struct RequestFields {
    pub user_agent: Option<String>,
    pub ip_address: String,
    pub method: String,
    pub path: String,
}

impl RequestFields {
    pub fn from_request(req: &actix_web::HttpRequest) -> Self {
        Self {
            user_agent: crate::utils::extract_user_agent(req),
            ip_address: crate::utils::extract_client_ip(req),
            method: req.method().to_string(),
            path: req.path().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_request_fields_from_request() {
        let req = TestRequest::post()
            .uri("/lock")
            .insert_header(("User-Agent", "door-panel/1.0"))
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .to_http_request();

        let fields = RequestFields::from_request(&req);
        assert_eq!(fields.method, "POST");
        assert_eq!(fields.path, "/lock");
        assert_eq!(fields.ip_address, "203.0.113.7");
        assert_eq!(fields.user_agent.as_deref(), Some("door-panel/1.0"));
    }
}
