//! HTTP client for the Sesame cloud command API.
//!
//! One call to [`SesameClient::dispatch`] sends exactly one
//! `POST {base}/{uuid}/cmd` request. There are no retries: a signature is
//! only valid for its time bucket, and the caller decides what a failure
//! means.

use crate::{
    config::SesameConfig,
    models::{Command, CommandRequest},
    services::signature::Signature,
};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Vendor header carrying the Sesame cloud API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Client settings derived from [`SesameConfig`]
#[derive(Debug, Clone)]
pub struct SesameClientConfig {
    pub api_base_url: String,
    pub api_key: String,
    pub request_timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
}

impl From<&SesameConfig> for SesameClientConfig {
    fn from(config: &SesameConfig) -> Self {
        Self {
            api_base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
            request_timeout_seconds: config.request_timeout_seconds,
            connect_timeout_seconds: config.connect_timeout_seconds,
        }
    }
}

/// Result of a command the cloud accepted
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub status: u16,
    pub duration: Duration,
}

/// Errors that can occur while sending a device command
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),
}

impl DispatchError {
    /// Short label for metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            DispatchError::Network(_) => "network_error",
            DispatchError::Timeout => "timeout",
            DispatchError::UnexpectedStatus(_) => "http_error",
        }
    }
}

impl From<reqwest::Error> for DispatchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            DispatchError::Timeout
        } else {
            DispatchError::Network(e)
        }
    }
}

/// Sends signed commands to the Sesame cloud
#[derive(Clone)]
pub struct SesameClient {
    client: Client,
    config: SesameClientConfig,
}

impl SesameClient {
    /// Create a client with bounded request and connect timeouts
    pub fn new(config: SesameClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// Command URL for a device
    pub fn command_url(&self, device_id: &str) -> String {
        format!("{}/{}/cmd", self.config.api_base_url, device_id)
    }

    /// Send one command to one device
    pub async fn dispatch(
        &self,
        device_id: &str,
        command: Command,
        signature: &Signature,
    ) -> Result<DispatchOutcome, DispatchError> {
        let url = self.command_url(device_id);
        let body = CommandRequest::new(command, signature.to_hex());
        let start = Instant::now();

        let result = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await;

        let duration = start.elapsed();

        match result {
            Ok(response) if response.status().is_success() => {
                let status = response.status().as_u16();
                info!(
                    device_id = %device_id,
                    command = %command,
                    status,
                    duration_ms = duration.as_millis() as u64,
                    "Sesame command accepted"
                );
                Ok(DispatchOutcome { status, duration })
            }
            Ok(response) => {
                let status = response.status().as_u16();
                warn!(
                    device_id = %device_id,
                    command = %command,
                    status,
                    duration_ms = duration.as_millis() as u64,
                    "Sesame command rejected"
                );
                Err(DispatchError::UnexpectedStatus(status))
            }
            Err(e) => {
                let err = DispatchError::from(e);
                error!(
                    device_id = %device_id,
                    command = %command,
                    error = %err,
                    duration_ms = duration.as_millis() as u64,
                    "Sesame command failed"
                );
                Err(err)
            }
        }
    }
}
