//! Shapes that cross the persistence boundary.
//!
//! Everything here is plain data: the per-date record kept by the host, the
//! mid-session snapshot used to resume a daily puzzle, and the small pieces of
//! vocabulary (feedback, used words, generator checkpoints) that both sides
//! share. Decoding is lenient, a malformed payload is reported as "nothing
//! stored" instead of an error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use record::*;
pub use snapshot::*;

mod record;
mod snapshot;

/// How a feedback message should be presented.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Neutral,
    Info,
    Success,
    Error,
}

/// Last message shown to the player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub message: String,
    pub severity: Severity,
}

impl Feedback {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn neutral(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Neutral)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }
}

/// A word accepted during a session, with the score it earned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedWord {
    pub word: String,
    pub score: i32,
}

/// Internal position of the deterministic daily generator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngCheckpoint {
    pub state: u64,
    pub calls: u64,
}

/// Encodes a value for storage.
pub fn encode<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

/// Decodes a stored value, `None` when the payload cannot be understood.
pub fn decode<T: DeserializeOwned>(payload: &str) -> Option<T> {
    match serde_json::from_str(payload) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Discarding malformed stored data: {}", err);
            None
        }
    }
}
