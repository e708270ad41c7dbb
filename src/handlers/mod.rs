//! HTTP request handlers for API endpoints.
//!
//! This module contains the door command handlers, the operational
//! endpoints, and the application factory.

pub mod command;
pub mod health;
pub mod metrics;
pub mod openapi;
pub mod version;

pub use command::*;
pub use health::*;
pub use metrics::*;
pub use openapi::*;
pub use version::*;
