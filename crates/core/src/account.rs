//! The account record handed over by the host on login.
//!
//! The host's user store owns the canonical account shape; the gate only
//! needs a stable projection of it: a unique id plus whatever identity
//! attributes happen to be populated.

use serde::{Deserialize, Serialize};

/// Host-opaque account record.
///
/// # Invariants
/// - `id` is unique within the host's user store and never empty.
/// - `email` and `name` are both optional; hosts differ in which they fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier assigned by the host's user store.
    pub id: String,
    /// Primary email address, if the host tracks one.
    pub email: Option<String>,
    /// Login/display name, used as the identity fallback.
    pub name: Option<String>,
}

impl Account {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            name: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Resolve the identity used for the backend query.
    ///
    /// Prefers the email field, falls back to the name field. Blank values
    /// count as absent. Returns `None` when neither is usable — the caller
    /// is expected to fail open in that case.
    pub fn login_identity(&self) -> Option<&str> {
        fn non_blank(value: &Option<String>) -> Option<&str> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
        }

        non_blank(&self.email).or_else(|| non_blank(&self.name))
    }
}
