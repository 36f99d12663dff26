//! User store capability surface.
//!
//! Host storage APIs vary across host versions; instead of probing a
//! concrete API for method presence at runtime, the host implements this one
//! narrow trait and advertises capabilities by overriding the operations its
//! storage layer actually offers. Everything defaults to `Unsupported`.

use dex50_core::Account;
use thiserror::Error;

/// Storage-level error for removal attempts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store does not implement this removal capability.
    #[error("operation not supported by this user store")]
    Unsupported,

    /// The account does not exist in the store.
    #[error("account not found")]
    NotFound,

    /// The storage backend failed.
    #[error("storage failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Removal capabilities a host user store may offer.
///
/// The gate probes these in declaration order and stops at the first that is
/// supported and succeeds. A store overrides only what it can actually do;
/// the defaults keep the rest `Unsupported` so the gate degrades gracefully
/// on minimal hosts.
#[allow(unused_variables)]
pub trait UserStore {
    /// Remove a user given the full account record.
    fn remove_by_record(&mut self, account: &Account) -> Result<(), StoreError> {
        Err(StoreError::Unsupported)
    }

    /// Remove a user given only its unique identifier.
    fn remove_by_id(&mut self, id: &str) -> Result<(), StoreError> {
        Err(StoreError::Unsupported)
    }

    /// Delete directly from the store's underlying collection by id.
    ///
    /// This is the lowest-level escape hatch; callers treat `NotFound` from
    /// this operation as "already gone" rather than a failure.
    fn remove_from_collection(&mut self, id: &str) -> Result<(), StoreError> {
        Err(StoreError::Unsupported)
    }
}
