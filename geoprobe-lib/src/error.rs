//! Error handling for probing operations.
//!
//! This module defines the error type for the small set of failures that can
//! actually abort a run. Note that per-probe network failures are *not*
//! errors here: they resolve to `Outcome` values with the network sentinel
//! and never escape the work unit.

use std::fmt;

/// Main error type for probing operations.
#[derive(Debug, Clone)]
pub enum ProbeError {
    /// Invalid configuration (bad endpoint, zero requests, etc.)
    Config { message: String },

    /// Output sink could not be opened or written.
    /// Sink-open failure is fatal and aborts the run before any dispatch.
    Sink { path: String, message: String },

    /// HTTP client construction failed
    Client {
        message: String,
        source: Option<String>,
    },

    /// JSON serialization/deserialization failed outside a probe
    Parse { message: String },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl ProbeError {
    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new sink error.
    pub fn sink<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::Sink {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new client error.
    pub fn client<M: Into<String>>(message: M) -> Self {
        Self::Client {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new client error with source information.
    pub fn client_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::Client {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::Sink { path, message } => {
                write!(f, "Output sink error at '{}': {}", path, message)
            }
            Self::Client { message, source } => {
                if let Some(source) = source {
                    write!(f, "Client error: {} (source: {})", message, source)
                } else {
                    write!(f, "Client error: {}", message)
                }
            }
            Self::Parse { message } => {
                write!(f, "Parse error: {}", message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for ProbeError {}

// Implement From conversions for common error types
impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        Self::client_with_source("HTTP client failure", err.to_string())
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: format!("JSON handling failed: {}", err),
        }
    }
}

impl From<std::io::Error> for ProbeError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_error_display_includes_path() {
        let err = ProbeError::sink("results.csv", "permission denied");
        let msg = err.to_string();
        assert!(msg.contains("results.csv"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_client_error_with_source() {
        let err = ProbeError::client_with_source("builder failed", "tls backend");
        assert!(err.to_string().contains("tls backend"));
    }
}
