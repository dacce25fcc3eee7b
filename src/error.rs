//! Error types for atlasresp
//!
//! Provides a unified error type for all client operations.

use std::io::ErrorKind;

use thiserror::Error;

/// Result type alias using RespError
pub type Result<T> = std::result::Result<T, RespError>;

/// Unified error type for atlasresp operations
#[derive(Debug, Error)]
pub enum RespError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Connection closed by server")]
    ConnectionClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Wire Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Format error: {0}")]
    Format(String),

    // -------------------------------------------------------------------------
    // Reply Errors
    // -------------------------------------------------------------------------
    /// Message text is kept as the server sent it (e.g. "ERR ...", "WRONGTYPE ...").
    /// Bytes that are not valid UTF-8 become U+FFFD.
    #[error("{0}")]
    Server(String),

    #[error("Projection mismatch: expected {expected}, found {found}")]
    ProjectionMismatch {
        expected: &'static str,
        found: String,
    },

    // -------------------------------------------------------------------------
    // Usage Errors
    // -------------------------------------------------------------------------
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl RespError {
    /// True for failures that leave the connection unusable
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            RespError::Connection(_) | RespError::ConnectionClosed | RespError::Io(_)
        )
    }

    /// Map socket errors that mean "the peer went away" onto `ConnectionClosed`
    pub(crate) fn from_io(err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::UnexpectedEof
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe => RespError::ConnectionClosed,
            _ => RespError::Io(err),
        }
    }
}
