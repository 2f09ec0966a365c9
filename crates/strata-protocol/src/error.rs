//! Error types for protocol decoding.
//!
//! These errors stay inside the ingestion boundary: the processor logs and
//! drops an offending operation and moves on. Nothing here crosses the
//! public interface as a failure.

use thiserror::Error;

/// Result type alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while decoding protocol input.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The value is not shaped like a protocol message at all.
    #[error("invalid message: {message}")]
    InvalidMessage {
        /// Description of what went wrong.
        message: String,
    },

    /// The operation object carries no recognized discriminator key.
    #[error("unknown operation discriminator: {keys:?}")]
    UnknownOperation {
        /// The keys the object actually carried.
        keys: Vec<String>,
    },

    /// The payload failed structural decoding (e.g. missing `surfaceId`).
    #[error("malformed operation: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ProtocolError {
    /// Create an invalid message error.
    #[inline]
    pub fn invalid_message(message: impl Into<String>) -> Self {
        ProtocolError::InvalidMessage {
            message: message.into(),
        }
    }

    /// Create an unknown operation error.
    #[inline]
    pub fn unknown_operation(keys: Vec<String>) -> Self {
        ProtocolError::UnknownOperation { keys }
    }
}
