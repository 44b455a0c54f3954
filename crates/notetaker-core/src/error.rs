//! Error types for notetaker-core

use std::fmt;

use thiserror::Error;

/// Result type alias using notetaker-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of a failure, stable across transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Rejected locally before any request was made
    Validation,
    /// The backend answered 404
    NotFound,
    /// The backend answered with a 5xx status
    ServerTransient,
    /// No response was received
    Transport,
    /// Any other status, or a response of the wrong shape
    UnknownClient,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::ServerTransient => "server_transient",
            Self::Transport => "transport",
            Self::UnknownClient => "unknown_client",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur in notetaker-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input, detected locally
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Requested note does not exist
    #[error("Note not found: {0}")]
    NotFound(String),

    /// Server-side failure that may succeed on retry
    #[error("Server error (HTTP {status}): {message}")]
    ServerTransient { status: u16, message: String },

    /// Network-level failure, no response received
    #[error("Transport error: {0}")]
    Transport(String),

    /// Unexpected status or malformed response
    #[error("Unexpected response: {0}")]
    UnknownClient(String),
}

impl Error {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::ServerTransient { .. } => ErrorKind::ServerTransient,
            Self::Transport(_) => ErrorKind::Transport,
            Self::UnknownClient(_) => ErrorKind::UnknownClient,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}
