//! Business logic and service layer modules.
//!
//! This module contains the signature generator, the Sesame cloud client,
//! the two-bolt door orchestration, and metrics collection.

pub mod door;
pub mod metrics;
pub mod sesame_client;
pub mod signature;

pub use door::*;
pub use metrics::*;
pub use sesame_client::*;
pub use signature::*;
