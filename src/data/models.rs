//! Record keys and store outcomes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque name of a record's storage slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for RecordKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Outcome of a store write
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    pub successful: bool,
    pub message: String,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            successful: true,
            message: String::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            successful: false,
            message: message.into(),
        }
    }
}

/// Outcome of a store read.
///
/// `successful == false` covers both "not found" and storage faults; the
/// message says which.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordQueryResult<R> {
    pub record: Option<R>,
    pub successful: bool,
    pub message: String,
}

impl<R> RecordQueryResult<R> {
    pub fn success(record: R) -> Self {
        Self {
            record: Some(record),
            successful: true,
            message: String::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            record: None,
            successful: false,
            message: message.into(),
        }
    }

    /// The record if the read succeeded, otherwise `fallback`
    pub fn record_or(self, fallback: R) -> R {
        match self.record {
            Some(record) if self.successful => record,
            _ => fallback,
        }
    }
}
