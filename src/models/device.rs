//! Configured Sesame devices.

use crate::services::signature::SecretKey;

/// One bolt of the door: the cloud UUID and the key that signs its commands.
#[derive(Debug, Clone)]
pub struct DeviceTarget {
    /// 1-based position in configuration, used in logs and metrics
    pub slot: usize,
    /// UUID as configured; sent verbatim in the command URL
    pub uuid: String,
    pub secret_key: SecretKey,
}

impl DeviceTarget {
    pub fn new(slot: usize, uuid: impl Into<String>, secret_key: SecretKey) -> Self {
        Self {
            slot,
            uuid: uuid.into(),
            secret_key,
        }
    }
}
