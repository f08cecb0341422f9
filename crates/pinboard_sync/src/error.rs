//! Error types for the sync controller.

use pinboard_protocol::ProtocolError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while talking to the message store.
///
/// The user-facing surface deliberately does not distinguish these: a
/// failed fetch or submit produces the same transient notice whatever
/// the underlying cause. The variants exist for logging and tests.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The request could not complete (connection refused, DNS, etc.).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("http status {status}")]
    Http {
        /// The HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded or had the wrong shape.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The server answered 2xx but did not report success.
    #[error("server rejected the request: {0}")]
    Rejected(String),

    /// The store does not accept appends.
    #[error("store is read-only")]
    ReadOnlyStore,

    /// The request parameters were invalid before any wire activity.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl SyncError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        SyncError::Transport(message.into())
    }

    /// Returns true if a later attempt against the same store could
    /// plausibly succeed.
    pub fn is_transient(&self) -> bool {
        !matches!(self, SyncError::ReadOnlyStore | SyncError::InvalidRequest(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SyncError::Http { status: 503 };
        assert_eq!(err.to_string(), "http status 503");

        let err = SyncError::transport("connection refused");
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn transience() {
        assert!(SyncError::transport("timeout").is_transient());
        assert!(SyncError::Http { status: 500 }.is_transient());
        assert!(!SyncError::ReadOnlyStore.is_transient());
    }
}
