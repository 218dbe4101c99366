//! Error types for the Mafteah library.
//!
//! All fallible operations return [`MafteahError`] through the [`Result`] alias.
//! Query-time paths (search, expansion, rule evaluation) are total and do not
//! produce errors for odd input; errors come from configuration, I/O and the
//! worker protocol.
//!
//! # Examples
//!
//! ```
//! use mafteah::error::{MafteahError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(MafteahError::invalid_config("ngram_size must be at least 1"))
//! }
//!
//! assert!(example_operation().is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Mafteah operations.
#[derive(Error, Debug)]
pub enum MafteahError {
    /// I/O errors (reading corpora, configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (tokenizer construction, filters)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Index-related errors
    #[error("Index error: {0}")]
    Index(String),

    /// Query-related errors
    #[error("Query error: {0}")]
    Query(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Worker protocol errors (unknown message kinds, closed channels)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Operation cancelled
    #[error("Operation cancelled: {0}")]
    OperationCancelled(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with MafteahError.
pub type Result<T> = std::result::Result<T, MafteahError>;

impl MafteahError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        MafteahError::Analysis(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        MafteahError::Index(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        MafteahError::Query(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        MafteahError::Config(msg.into())
    }

    /// Create a new protocol error.
    pub fn protocol<S: Into<String>>(msg: S) -> Self {
        MafteahError::Protocol(msg.into())
    }

    /// Create a new cancelled error.
    pub fn cancelled<S: Into<String>>(msg: S) -> Self {
        MafteahError::OperationCancelled(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        MafteahError::Other(msg.into())
    }

    /// Whether this error represents a cancelled operation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, MafteahError::OperationCancelled(_))
    }
}
