//! In-memory host implementations.
//!
//! These back the gate's tests and let embedders dry-run the wiring without
//! a real host. `MemoryUserStore` can be narrowed to any subset of the
//! removal capabilities and can inject failures.

use std::collections::HashMap;

use dex50_core::Account;

use crate::response::{ResponseChannel, ResponseError};
use crate::session::{Session, SessionError};
use crate::store::{StoreError, UserStore};

// ─────────────────────────────────────────────────────────────────────────────
// MemoryUserStore
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory user store with a configurable capability set.
///
/// By default all three removal capabilities are enabled; use the
/// `without_*` builders to simulate narrower hosts and `failing` to simulate
/// a broken storage backend.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    accounts: HashMap<String, Account>,
    disable_by_record: bool,
    disable_by_id: bool,
    disable_collection: bool,
    fail_removals: bool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account into the store.
    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.id.clone(), account);
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.insert(account);
        self
    }

    pub fn without_remove_by_record(mut self) -> Self {
        self.disable_by_record = true;
        self
    }

    pub fn without_remove_by_id(mut self) -> Self {
        self.disable_by_id = true;
        self
    }

    pub fn without_collection_access(mut self) -> Self {
        self.disable_collection = true;
        self
    }

    /// Make every supported removal fail with a backend error.
    pub fn failing(mut self) -> Self {
        self.fail_removals = true;
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.accounts.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        if self.fail_removals {
            return Err(StoreError::backend("simulated storage failure"));
        }
        match self.accounts.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }
}

impl UserStore for MemoryUserStore {
    fn remove_by_record(&mut self, account: &Account) -> Result<(), StoreError> {
        if self.disable_by_record {
            return Err(StoreError::Unsupported);
        }
        self.delete(&account.id)
    }

    fn remove_by_id(&mut self, id: &str) -> Result<(), StoreError> {
        if self.disable_by_id {
            return Err(StoreError::Unsupported);
        }
        self.delete(id)
    }

    fn remove_from_collection(&mut self, id: &str) -> Result<(), StoreError> {
        if self.disable_collection {
            return Err(StoreError::Unsupported);
        }
        self.delete(id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RecordingSession
// ─────────────────────────────────────────────────────────────────────────────

/// Session double that records invalidation and can simulate teardown
/// failures.
#[derive(Debug, Default)]
pub struct RecordingSession {
    invalidated: bool,
    fail_teardown: bool,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            invalidated: false,
            fail_teardown: true,
        }
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }
}

impl Session for RecordingSession {
    fn invalidate(&mut self) -> Result<(), SessionError> {
        if self.fail_teardown {
            return Err(SessionError::teardown("simulated teardown failure"));
        }
        self.invalidated = true;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BufferedResponse
// ─────────────────────────────────────────────────────────────────────────────

/// Response channel double buffering the single committed response.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    committed: bool,
    status: Option<u16>,
    content_type: Option<String>,
    body: Option<String>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel the host already committed a response on.
    pub fn already_committed() -> Self {
        Self {
            committed: true,
            ..Self::default()
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

impl ResponseChannel for BufferedResponse {
    fn is_committed(&self) -> bool {
        self.committed
    }

    fn send(&mut self, status: u16, content_type: &str, body: &str) -> Result<(), ResponseError> {
        if self.committed {
            return Err(ResponseError::AlreadyCommitted);
        }
        self.committed = true;
        self.status = Some(status);
        self.content_type = Some(content_type.to_string());
        self.body = Some(body.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Account {
        Account::new("u-alice").with_email("alice@x.com")
    }

    #[test]
    fn store_removes_seeded_account() {
        let mut store = MemoryUserStore::new().with_account(alice());
        assert!(store.contains("u-alice"));

        store.remove_by_id("u-alice").unwrap();
        assert!(!store.contains("u-alice"));
    }

    #[test]
    fn store_reports_not_found_for_missing_account() {
        let mut store = MemoryUserStore::new();
        assert_eq!(store.remove_by_id("ghost"), Err(StoreError::NotFound));
    }

    #[test]
    fn disabled_capability_is_unsupported() {
        let mut store = MemoryUserStore::new()
            .with_account(alice())
            .without_remove_by_record();
        assert_eq!(
            store.remove_by_record(&alice()),
            Err(StoreError::Unsupported)
        );
        // The account is untouched by the unsupported path.
        assert!(store.contains("u-alice"));
    }

    #[test]
    fn failing_store_keeps_account() {
        let mut store = MemoryUserStore::new().with_account(alice()).failing();
        assert!(matches!(
            store.remove_by_id("u-alice"),
            Err(StoreError::Backend(_))
        ));
        assert!(store.contains("u-alice"));
    }

    #[test]
    fn session_records_invalidation() {
        let mut session = RecordingSession::new();
        assert!(!session.is_invalidated());
        session.invalidate().unwrap();
        assert!(session.is_invalidated());
    }

    #[test]
    fn failing_session_stays_live() {
        let mut session = RecordingSession::failing();
        assert!(session.invalidate().is_err());
        assert!(!session.is_invalidated());
    }

    #[test]
    fn response_is_write_once() {
        let mut response = BufferedResponse::new();
        response.send(403, "text/plain", "denied").unwrap();
        assert!(response.is_committed());
        assert_eq!(response.status(), Some(403));
        assert_eq!(response.body(), Some("denied"));

        assert_eq!(
            response.send(200, "text/plain", "late"),
            Err(ResponseError::AlreadyCommitted)
        );
        assert_eq!(response.body(), Some("denied"));
    }

    #[test]
    fn precommitted_response_rejects_writes() {
        let mut response = BufferedResponse::already_committed();
        assert!(response.send(403, "text/plain", "denied").is_err());
        assert_eq!(response.body(), None);
    }
}
