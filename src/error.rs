//! Error types for superpip operations.
//!
//! This module defines [`SuperpipError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Discovery and catalog failures are absorbed and logged, never returned
//! - Per-operation failures inside a batch live in the batch report
//! - Only pre-flight validation problems (empty query, ambiguous target,
//!   no interpreter available) are returned as `SuperpipError`
//! - Use `anyhow::Error` (via `SuperpipError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for superpip operations.
#[derive(Debug, Error)]
pub enum SuperpipError {
    /// A catalog search was issued with an empty query.
    #[error("Invalid query: search text must not be empty")]
    InvalidQuery,

    /// The requested target does not fit the operation.
    #[error("Invalid selection: {message}")]
    InvalidSelection { message: String },

    /// An operation needs at least one interpreter but none were discovered.
    #[error("No Python installations detected")]
    NoInterpreters,

    /// A single (non-batch) operation failed.
    #[error("Operation on {target} failed: {message}")]
    OperationFailed { target: String, message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A subprocess could not be launched or waited on.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SuperpipError {
    /// Whether this error was raised before any work started.
    ///
    /// The CLI maps these to exit code 2.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::InvalidQuery | Self::InvalidSelection { .. } | Self::NoInterpreters
        )
    }
}

/// Result type alias for superpip operations.
pub type Result<T> = std::result::Result<T, SuperpipError>;
