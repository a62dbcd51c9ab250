//! Shared utilities for operations across vaultstore crates.
//!
//! Provides helpers for:
//! - Serialization with consistent error handling
//! - Operation tracking (id + elapsed time)
//! - Token estimation for context payloads

use crate::{Error, Result};
use std::time::Instant;

/// Generic JSON serialization with consistent error handling
/// Works with any type that implements Serialize (including slices)
pub fn to_json_string<T: serde::Serialize + ?Sized>(data: &T, context: &str) -> Result<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| Error::other(format!("Failed to serialize {} as JSON: {}", context, e)))
}

/// Rough token estimate (~4 characters per token)
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}

/// Operation tracking: a unique id and a start instant
pub struct TransactionBuilder {
    transaction_id: String,
    start_time: Instant,
}

impl TransactionBuilder {
    /// Start tracking a new operation
    pub fn new() -> Self {
        Self {
            transaction_id: uuid::Uuid::new_v4().to_string(),
            start_time: Instant::now(),
        }
    }

    /// Get the transaction ID
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_to_json_string() {
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };
        let json = to_json_string(&data, "test_data").unwrap();
        assert!(json.contains("test"));
        assert!(json.contains("42"));
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcdefgh"), 2);
        assert_eq!(estimate_tokens("ééééé"), 1);
    }

    #[test]
    fn test_transaction_builder() {
        let builder = TransactionBuilder::new();
        assert_eq!(builder.transaction_id().len(), 36);
        assert!(builder.elapsed_ms() < 1000);
    }
}
