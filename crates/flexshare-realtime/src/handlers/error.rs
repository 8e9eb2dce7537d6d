//! Handler error types
//!
//! These never reach the client: the socket loop logs them and moves on.

use thiserror::Error;

/// Handler error type
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Frame is not a valid event envelope
    #[error("Malformed frame: {0}")]
    MalformedFrame(#[source] serde_json::Error),

    /// Event name is not one the channel handles
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    /// Event data is missing or has the wrong shape
    #[error("Invalid payload for {event}: {reason}")]
    InvalidPayload { event: &'static str, reason: String },
}

impl HandlerError {
    /// Create an invalid payload error
    pub fn invalid_payload(event: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidPayload {
            event,
            reason: reason.to_string(),
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
