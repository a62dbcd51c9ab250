//! JSON envelopes printed by the CLI

use serde::Serialize;
use vaultstore_core::{Error, ErrorKind};

/// Successful command output
#[derive(Debug, Clone, Serialize)]
pub struct StandardResponse<T: Serialize> {
    /// Command name, e.g. `search`
    pub operation: String,
    pub data: T,
    /// Number of items when `data` is a list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// How long the operation took in milliseconds
    pub took_ms: u64,
}

impl<T: Serialize> StandardResponse<T> {
    pub fn new(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            data,
            count: None,
            took_ms: 0,
        }
    }

    /// Set item count
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Set operation time
    pub fn with_duration(mut self, ms: u64) -> Self {
        self.took_ms = ms;
        self
    }
}

/// Failed command output
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorKind,
    pub message: String,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        Self {
            error: err.kind(),
            message: err.to_string(),
        }
    }
}
