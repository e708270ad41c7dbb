//! Data models shared by the handlers and the Sesame client.
//!
//! This module contains the wire format of outbound device commands,
//! the configured device targets, and the operational response models.

pub mod api;
pub mod command;
pub mod device;

pub use api::*;
pub use command::*;
pub use device::*;
