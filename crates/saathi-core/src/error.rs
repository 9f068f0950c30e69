//! Error types for the CyberSaathi application.

use thiserror::Error;

/// A shared error type for the entire CyberSaathi workspace.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone)]
pub enum SaathiError {
    /// Network-level failure (connection refused, DNS, TLS, ...)
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// A bounded remote call exceeded its deadline
    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The backend answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The backend body was missing expected fields or failed to parse
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The backend replied `success: false` with an error string
    #[error("Backend error: {0}")]
    Backend(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Audio capture / device error
    #[error("Recording error: {0}")]
    Recording(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SaathiError {
    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a Timeout error
    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    /// Creates an Http error
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a MalformedPayload error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload(message.into())
    }

    /// Creates a Backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// True for failures that mean "could not reach or understand the
    /// backend" as opposed to a well-formed negative answer.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::Http { .. }
        )
    }
}

impl From<reqwest::Error> for SaathiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not expose the configured deadline on the error
            Self::Timeout { seconds: 0 }
        } else if err.is_connect() {
            Self::Transport {
                message: format!("Cannot connect to server: {err}"),
            }
        } else if err.is_decode() {
            Self::MalformedPayload(err.to_string())
        } else {
            Self::Transport {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for SaathiError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}

impl From<std::io::Error> for SaathiError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(format!("{} (kind: {:?})", err, err.kind()))
    }
}

/// A type alias for `Result<T, SaathiError>`.
pub type Result<T> = std::result::Result<T, SaathiError>;
