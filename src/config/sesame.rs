//! Sesame cloud credentials and device configuration.

use crate::{
    models::DeviceTarget,
    services::signature::{SecretKey, SignatureError},
};
use std::{env, fmt};

/// Default Sesame cloud endpoint prefix; commands go to `{base}/{uuid}/cmd`
pub const DEFAULT_API_BASE_URL: &str = "https://app.candyhouse.co/api/sesame2";

const DEVICE_VARS: [(&str, &str); 2] = [
    ("SESAME3_UUID1", "SESAME3_SECRET_KEY1"),
    ("SESAME3_UUID2", "SESAME3_SECRET_KEY2"),
];

/// Errors that prevent the proxy from starting
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("invalid secret key in {name}: {source}")]
    SecretKey {
        name: &'static str,
        #[source]
        source: SignatureError,
    },
}

/// Process-lifetime configuration, loaded once at startup
#[derive(Clone)]
pub struct SesameConfig {
    pub port: u16,
    pub api_key: String,
    pub api_base_url: String,
    pub request_timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub devices: Vec<DeviceTarget>,
}

impl fmt::Debug for SesameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SesameConfig")
            .field("port", &self.port)
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .field("devices", &self.devices)
            .finish()
    }
}

impl SesameConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Unset and empty are the same thing here
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let port = require("PORT")?
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?;

        let api_key = require("API_KEY")?;

        let mut devices = Vec::with_capacity(DEVICE_VARS.len());
        for (index, (uuid_var, key_var)) in DEVICE_VARS.into_iter().enumerate() {
            let uuid = require(uuid_var)?;
            uuid::Uuid::parse_str(&uuid).map_err(|e| ConfigError::Invalid {
                name: uuid_var,
                reason: e.to_string(),
            })?;

            let secret_key = SecretKey::from_hex(&require(key_var)?)
                .map_err(|source| ConfigError::SecretKey {
                    name: key_var,
                    source,
                })?;

            devices.push(DeviceTarget::new(index + 1, uuid, secret_key));
        }

        let api_base_url = parse_base_url(
            get("SESAME_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        )?;

        let request_timeout_seconds = parse_seconds(get("SESAME_REQUEST_TIMEOUT_SECONDS"), 10)
            .map_err(|reason| ConfigError::Invalid {
                name: "SESAME_REQUEST_TIMEOUT_SECONDS",
                reason,
            })?;

        let connect_timeout_seconds = parse_seconds(get("SESAME_CONNECT_TIMEOUT_SECONDS"), 5)
            .map_err(|reason| ConfigError::Invalid {
                name: "SESAME_CONNECT_TIMEOUT_SECONDS",
                reason,
            })?;

        Ok(Self {
            port,
            api_key,
            api_base_url,
            request_timeout_seconds,
            connect_timeout_seconds,
            devices,
        })
    }

    /// Listen on all interfaces
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_base_url(raw: String) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(&raw).map_err(|e| ConfigError::Invalid {
        name: "SESAME_API_BASE_URL",
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            name: "SESAME_API_BASE_URL",
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
}

fn parse_seconds(raw: Option<String>, default: u64) -> Result<u64, String> {
    match raw {
        None => Ok(default),
        Some(v) => match v.parse::<u64>() {
            Ok(0) => Err("must be greater than zero".to_string()),
            Ok(n) => Ok(n),
            Err(e) => Err(e.to_string()),
        },
    }
}
