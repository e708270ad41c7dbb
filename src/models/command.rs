//! Sesame device commands and their wire representation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base64 of the application name, shown in the Sesame app history.
pub const HISTORY_TAG: &str = "c2VzYW1lMy1wcm94eQ==";

/// Operation codes understood by the Sesame cloud command endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Defined by the cloud API; no endpoint sends it.
    Toggle,
    Lock,
    Unlock,
}

impl Command {
    /// The code placed in the `cmd` field
    pub fn code(self) -> &'static str {
        match self {
            Command::Toggle => "88",
            Command::Lock => "82",
            Command::Unlock => "83",
        }
    }

    /// Lowercase name used in logs and metric labels
    pub fn name(self) -> &'static str {
        match self {
            Command::Toggle => "toggle",
            Command::Lock => "lock",
            Command::Unlock => "unlock",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// JSON body of `POST /api/sesame2/{uuid}/cmd`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandRequest {
    pub cmd: String,
    pub history: String,
    pub sign: String,
}

impl CommandRequest {
    pub fn new(command: Command, sign_hex: String) -> Self {
        Self {
            cmd: command.code().to_string(),
            history: HISTORY_TAG.to_string(),
            sign: sign_hex,
        }
    }
}
