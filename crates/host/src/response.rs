//! Write-once outbound channel for the login response.

use thiserror::Error;

/// Response channel error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// The host already committed a response; nothing further may be written.
    #[error("response already committed")]
    AlreadyCommitted,

    /// The underlying transport rejected the write.
    #[error("response write failed: {0}")]
    Write(String),
}

/// The login response channel owned by the host.
///
/// The channel is write-once: after one successful `send` (or after the host
/// itself commits a response) `is_committed` returns `true` and further
/// sends fail with [`ResponseError::AlreadyCommitted`]. Callers that must
/// not double-write check `is_committed` first.
pub trait ResponseChannel {
    /// Whether a response has already been committed on this channel.
    fn is_committed(&self) -> bool;

    /// Write a complete response (status, content type, body) and commit
    /// the channel.
    fn send(&mut self, status: u16, content_type: &str, body: &str) -> Result<(), ResponseError>;
}
