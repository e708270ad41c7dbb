//! Sesame3 Proxy - lock and unlock a two-bolt door through the Sesame cloud
//!
//! The proxy exposes `POST /lock` and `POST /unlock`. Each call sends the
//! matching command to two Sesame devices, one after the other, signing
//! every outbound request with a fresh time-based AES-CMAC tag.
//!
//! ## Architecture
//!
//! - `config/` - Environment loading for credentials, logging and metrics
//! - `models/` - Commands, device targets and response models
//! - `services/` - Signature generation, the Sesame client, door orchestration, metrics
//! - `handlers/` - HTTP handlers and the application factory
//! - `middleware/` - Request IDs and request metrics
//! - `utils/` - Request inspection helpers
//! - `telemetry` - Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```no_run
//! use actix_web::web;
//! use sesame3_proxy::{create_app, AppMetrics, DoorController, MetricsConfig, SesameConfig};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = SesameConfig::from_env().map_err(|e| std::io::Error::other(e.to_string()))?;
//!     let metrics = AppMetrics::new().map_err(|e| std::io::Error::other(e.to_string()))?;
//!     let door = DoorController::from_config(&config)
//!         .map_err(|e| std::io::Error::other(e.to_string()))?
//!         .with_metrics(metrics.clone());
//!
//!     let door = web::Data::new(door);
//!     let metrics = web::Data::new(metrics);
//!     let _app = create_app(door, metrics, MetricsConfig::default());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

pub use config::{ConfigError, LoggingConfig, MetricsConfig, SesameConfig};
pub use handlers::{create_app, create_openapi_spec, get_metrics, health, lock, unlock, version};
pub use middleware::{MetricsMiddleware, RequestIdMiddleware};
pub use models::{Command, CommandRequest, DeviceTarget, HealthResponse, VersionResponse, HISTORY_TAG};
pub use services::{
    compute_signature, compute_signature_at, AppMetrics, DeviceReport, DispatchError,
    DoorController, SecretKey, SesameClient, SesameClientConfig, Signature, SignatureError,
};
