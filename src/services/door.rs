//! Two-bolt door orchestration.
//!
//! A door is two Sesame devices operated as one. Each command is signed and
//! sent to device 1, then to device 2. The second dispatch starts only after
//! the first finished, and a failure on one bolt never stops the other.
//! Nothing is rolled back, so the bolts can end up in different states.

use crate::{
    config::SesameConfig,
    models::{Command, DeviceTarget},
    services::{
        metrics::AppMetrics,
        sesame_client::{DispatchError, DispatchOutcome, SesameClient, SesameClientConfig},
        signature::SignatureError,
    },
};
use std::time::Instant;
use tracing::{info, warn};

/// Why a single device command did not go through
#[derive(Debug, thiserror::Error)]
pub enum DeviceCommandError {
    #[error("signing failed: {0}")]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl DeviceCommandError {
    pub fn outcome(&self) -> &'static str {
        match self {
            DeviceCommandError::Signature(_) => "signature_error",
            DeviceCommandError::Dispatch(e) => e.outcome(),
        }
    }
}

/// Outcome of one command on one device
#[derive(Debug)]
pub struct DeviceReport {
    pub slot: usize,
    pub device_id: String,
    pub command: Command,
    pub result: Result<DispatchOutcome, DeviceCommandError>,
}

impl DeviceReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Immutable, process-lifetime context shared by the command handlers
pub struct DoorController {
    client: SesameClient,
    devices: Vec<DeviceTarget>,
    metrics: Option<AppMetrics>,
}

impl DoorController {
    pub fn new(client: SesameClient, devices: Vec<DeviceTarget>) -> Self {
        Self {
            client,
            devices,
            metrics: None,
        }
    }

    /// Build the controller and its HTTP client from loaded configuration
    pub fn from_config(config: &SesameConfig) -> Result<Self, reqwest::Error> {
        let client = SesameClient::new(SesameClientConfig::from(config))?;
        Ok(Self::new(client, config.devices.clone()))
    }

    /// Record per-device command metrics into `metrics`
    pub fn with_metrics(mut self, metrics: AppMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Send `command` to every device, in configuration order
    pub async fn operate(&self, command: Command) -> Vec<DeviceReport> {
        let mut reports = Vec::with_capacity(self.devices.len());

        for device in &self.devices {
            let start = Instant::now();
            let result = self.send(device, command).await;

            let outcome = match &result {
                Ok(_) => "success",
                Err(e) => e.outcome(),
            };
            if let Some(metrics) = &self.metrics {
                metrics.record_command(device.slot, command.name(), outcome, start.elapsed());
            }

            reports.push(DeviceReport {
                slot: device.slot,
                device_id: device.uuid.clone(),
                command,
                result,
            });
        }

        let succeeded = reports.iter().filter(|r| r.is_success()).count();
        if succeeded == reports.len() {
            info!(command = %command, devices = reports.len(), "Door command completed");
        } else {
            warn!(
                command = %command,
                devices = reports.len(),
                succeeded,
                "Door command partially failed"
            );
        }

        reports
    }

    async fn send(
        &self,
        device: &DeviceTarget,
        command: Command,
    ) -> Result<DispatchOutcome, DeviceCommandError> {
        // Signed right before sending; the tag only covers the current bucket
        let signature = device.secret_key.sign_now().inspect_err(|e| {
            warn!(slot = device.slot, device_id = %device.uuid, error = %e, "Failed to sign command");
        })?;

        Ok(self.client.dispatch(&device.uuid, command, &signature).await?)
    }
}
