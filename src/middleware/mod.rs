//! Middleware for cross-cutting request concerns.
//!
//! Request IDs with structured request logging, and Prometheus request
//! metrics.

pub mod metrics;
pub mod request_id;

pub use metrics::*;
pub use request_id::*;
