//! Request inspection helpers used by logging and metrics.

pub mod http;
pub mod route;

pub use http::*;
pub use route::*;
