//! Best-effort account removal.
//!
//! Removal never affects the denial decision: whatever happens here, the
//! caller proceeds to terminate the session. All store errors are converted
//! into the outcome and logged.

use dex50_core::Account;
use dex50_host::{StoreError, UserStore};

/// Which [`UserStore`] capability performed the removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalPath {
    ByRecord,
    ById,
    FromCollection,
}

impl core::fmt::Display for RemovalPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RemovalPath::ByRecord => write!(f, "remove_by_record"),
            RemovalPath::ById => write!(f, "remove_by_id"),
            RemovalPath::FromCollection => write!(f, "remove_from_collection"),
        }
    }
}

/// Result of a removal attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The account was deleted from the user store.
    Removed { via: RemovalPath },
    /// The account was already gone (idempotent re-denial).
    AlreadyAbsent,
    /// No capability was present, or every attempt failed.
    NotRemoved { detail: String },
}

impl RemovalOutcome {
    /// Whether the account is absent from the store after the attempt.
    pub fn account_is_gone(&self) -> bool {
        matches!(self, Self::Removed { .. } | Self::AlreadyAbsent)
    }
}

/// Attempt to remove `account` from the host's user store.
///
/// Probes the store's capabilities in priority order and stops at the first
/// that is supported and succeeds. `Unsupported` advances the probe
/// silently; other failures are logged and also advance it. The
/// collection-level probe treats `NotFound` as "already gone" so a repeated
/// denial for a purged account stays idempotent.
pub fn remove_account(store: &mut dyn UserStore, account: &Account) -> RemovalOutcome {
    let mut failures: Vec<String> = Vec::new();

    for path in [
        RemovalPath::ByRecord,
        RemovalPath::ById,
        RemovalPath::FromCollection,
    ] {
        let result = match path {
            RemovalPath::ByRecord => store.remove_by_record(account),
            RemovalPath::ById => store.remove_by_id(&account.id),
            RemovalPath::FromCollection => store.remove_from_collection(&account.id),
        };

        match result {
            Ok(()) => {
                tracing::info!(
                    account_id = %account.id,
                    via = %path,
                    "account removed from user store"
                );
                return RemovalOutcome::Removed { via: path };
            }
            Err(StoreError::Unsupported) => {
                tracing::debug!(via = %path, "capability not offered by this user store");
            }
            Err(StoreError::NotFound) if path == RemovalPath::FromCollection => {
                tracing::info!(
                    account_id = %account.id,
                    "account already absent from user store"
                );
                return RemovalOutcome::AlreadyAbsent;
            }
            Err(err) => {
                tracing::warn!(
                    account_id = %account.id,
                    via = %path,
                    error = %err,
                    "removal attempt failed; trying next capability"
                );
                failures.push(format!("{path}: {err}"));
            }
        }
    }

    let detail = if failures.is_empty() {
        "user store exposes no removal capability".to_string()
    } else {
        failures.join("; ")
    };
    tracing::warn!(account_id = %account.id, %detail, "account was not removed");
    RemovalOutcome::NotRemoved { detail }
}
