//! Error handling for batch fetch operations.
//!
//! This module defines the error type for failures that are the caller's
//! problem: bad configuration, a transport that could not be constructed,
//! or an operation that is not implemented. Per-item fetch failures are
//! deliberately NOT represented here — they are `FetchOutcome` values
//! inside the result sequence (see `types`).

use std::fmt;

/// Main error type for batch fetch operations.
///
/// Only configuration-level and construction-level failures travel this
/// channel. A fetch that produces no content never raises an error to the
/// caller; it contributes a failure outcome at its position in the result
/// sequence instead.
#[derive(Debug, Clone)]
pub enum FetchError {
    /// Invalid configuration (e.g. a concurrency limit of zero).
    /// Always raised before any fetch is attempted.
    Config { message: String },

    /// The fetch transport could not be constructed
    /// (e.g. TLS backend initialization failed).
    Transport {
        message: String,
        source: Option<String>,
    },

    /// The requested operation is declared but not implemented.
    NotImplemented { operation: String },

    /// Generic internal errors that don't fit other categories.
    Internal { message: String },
}

impl FetchError {
    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new transport construction error.
    pub fn transport<M: Into<String>>(message: M) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new transport construction error with source information.
    pub fn transport_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new not-implemented error.
    pub fn not_implemented<O: Into<String>>(operation: O) -> Self {
        Self::NotImplemented {
            operation: operation.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error was raised before any network I/O happened.
    ///
    /// Configuration and not-implemented errors are always pre-flight;
    /// callers can rely on no fetch having been attempted.
    pub fn is_pre_flight(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::NotImplemented { .. })
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::Transport { message, source } => {
                if let Some(source) = source {
                    write!(f, "Transport error: {} (source: {})", message, source)
                } else {
                    write!(f, "Transport error: {}", message)
                }
            }
            Self::NotImplemented { operation } => {
                write!(f, "Not implemented: {}", operation)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for FetchError {}

// Implement From conversions for common error types
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // Only reachable while building the HTTP client; request-level
        // errors are mapped to failure outcomes by the transport.
        Self::transport_with_source("HTTP client error", err.to_string())
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}
