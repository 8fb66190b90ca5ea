//! Request type sent by the client to the mock remote.
//!
//! One request travels per TCP connection, encoded as a single line of JSON.
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::QuoteError;

/// What the client asks the remote for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum CommandKind {
    /// Return the remote quote catalog.
    Fetch,
    /// Liveness check; the reply carries no items.
    Ping,
}

/// Command payload sent from client to remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Command kind.
    pub header: CommandKind,
    /// Optional cap on the number of returned items.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Command {
    /// Creates a new `FETCH` command.
    pub fn fetch(limit: Option<usize>) -> Self {
        Command {
            header: CommandKind::Fetch,
            limit,
        }
    }

    /// Creates a new `PING` command.
    pub fn ping() -> Self {
        Command {
            header: CommandKind::Ping,
            limit: None,
        }
    }

    /// Encode as one newline-terminated JSON line.
    pub fn to_line(&self) -> Result<Vec<u8>, QuoteError> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }

    /// Decode a line produced by [`Self::to_line`].
    pub fn from_line(line: &str) -> Result<Self, QuoteError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(QuoteError::Remote("empty command".to_string()));
        }
        Ok(serde_json::from_str(trimmed)?)
    }
}
