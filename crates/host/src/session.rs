//! Mutable session handle attached to a login request.

use thiserror::Error;

/// Session teardown error.
///
/// The gate treats teardown as best-effort; this error is logged and
/// swallowed, never surfaced to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session teardown failed: {0}")]
    Teardown(String),
}

impl SessionError {
    pub fn teardown(msg: impl Into<String>) -> Self {
        Self::Teardown(msg.into())
    }
}

/// A live session the host attached to the login request.
///
/// Implementations must be idempotent: invalidating an already-invalidated
/// session is a no-op, not an error.
pub trait Session {
    /// Invalidate/destroy the session so the denied user holds no live
    /// credentials.
    fn invalidate(&mut self) -> Result<(), SessionError>;
}
