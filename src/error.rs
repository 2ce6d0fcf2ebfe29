//! Error types and handling infrastructure for pilot-view.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! the library error type. `anyhow` is reserved for the binary entry point.
//!
//! ## Error classes
//!
//! - **Caller contract violations**: rendering a token kind the handler never declared.
//!   These fail fast and are never retried.
//! - **Impossible states**: the current element lost its bound token. These are fatal
//!   and must not be swallowed; see [`DisplayError::is_fatal`].
//! - **Ambient failures**: configuration, terminal and I/O errors from the front end.

use thiserror::Error;

/// The main error type for pilot-view operations.
#[derive(Error, Debug)]
pub enum DisplayError {
    /// A render was requested for a token kind outside the capability set
    #[error("Token kind not supported by this handler: {kind}. Check supports() first")]
    UnsupportedToken { kind: String },

    /// Internal bookkeeping reached a state that should be impossible
    #[error("Display invariant violated: {message}")]
    InvariantViolation { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// I/O failures from the terminal or config files
    #[error("I/O operation failed: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for pilot-view operations.
pub type Result<T> = std::result::Result<T, DisplayError>;

impl DisplayError {
    /// Create an UnsupportedToken error from any debuggable kind tag
    pub fn unsupported(kind: impl std::fmt::Debug) -> Self {
        Self::UnsupportedToken {
            kind: format!("{kind:?}"),
        }
    }

    /// Create an InvariantViolation with a descriptive message
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create an IoError from an io::Error with additional context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            message: message.into(),
            source,
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Whether this error signals a bug that must stop the display loop.
    ///
    /// Unsupported tokens are caller bugs, invariant violations are framework bugs;
    /// neither is a runtime condition that a retry could fix.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedToken { .. } | Self::InvariantViolation { .. }
        )
    }
}

impl From<std::io::Error> for DisplayError {
    fn from(err: std::io::Error) -> Self {
        let message = match err.kind() {
            std::io::ErrorKind::NotFound => "File not found",
            std::io::ErrorKind::PermissionDenied => "Permission denied",
            _ => "IO operation failed",
        };
        Self::IoError {
            message: message.to_string(),
            source: err,
        }
    }
}
