//! Error types for the vault store.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! Callers that need to branch on the failure class use [`Error::kind`]
//! instead of matching on messages.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error as ThisError;

/// The core error type for all vault store operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// Underlying filesystem failure (permissions, encoding, disk)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Path escapes the vault root or is otherwise unacceptable
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Missing document or folder
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// Write or create collision
    #[error("Already exists: {path}")]
    AlreadyExists { path: String },

    /// Non-recursive delete of a folder that still has entries
    #[error("Folder not empty: {path}")]
    NotEmpty { path: String },

    /// Frontmatter block could not be parsed
    #[error("Malformed metadata: {reason}")]
    MalformedMetadata { reason: String },

    /// Invalid configuration or malformed operation input
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Caller-imposed deadline expired before the operation finished
    #[error("Operation timed out after {seconds}s: {operation}")]
    Timeout { operation: String, seconds: u64 },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Failure class of an [`Error`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidPath,
    NotFound,
    AlreadyExists,
    NotEmpty,
    MalformedMetadata,
    IoFailure,
    Config,
    Timeout,
    Other,
}

impl ErrorKind {
    /// Containment violations are rejections, not usability hints.
    pub fn is_security_rejection(self) -> bool {
        matches!(self, ErrorKind::InvalidPath)
    }

    /// Stable snake_case name, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidPath => "invalid_path",
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::NotEmpty => "not_empty",
            ErrorKind::MalformedMetadata => "malformed_metadata",
            ErrorKind::IoFailure => "io_failure",
            ErrorKind::Config => "config",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Other => "other",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::IoFailure,
            Error::InvalidPath { .. } => ErrorKind::InvalidPath,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Error::NotEmpty { .. } => ErrorKind::NotEmpty,
            Error::MalformedMetadata { .. } => ErrorKind::MalformedMetadata,
            Error::ConfigError { .. } => ErrorKind::Config,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(path: impl Into<String>) -> Self {
        Error::NotFound { path: path.into() }
    }

    /// Create an already exists error
    pub fn already_exists(path: impl Into<String>) -> Self {
        Error::AlreadyExists { path: path.into() }
    }

    /// Create a folder not empty error
    pub fn not_empty(path: impl Into<String>) -> Self {
        Error::NotEmpty { path: path.into() }
    }

    /// Create a malformed metadata error
    pub fn malformed_metadata(reason: impl Into<String>) -> Self {
        Error::MalformedMetadata {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, seconds: u64) -> Self {
        Error::Timeout {
            operation: operation.into(),
            seconds,
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}
