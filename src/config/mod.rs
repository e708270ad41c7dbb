//! Configuration structures and loading utilities.
//!
//! Every structure here is read once at startup through `from_env()`.
//! Required Sesame credentials are fatal when missing; ambient settings
//! fall back to defaults.

pub mod dotenv;
pub mod logging;
pub mod metrics;
pub mod sesame;

pub use dotenv::*;
pub use logging::*;
pub use metrics::*;
pub use sesame::*;
