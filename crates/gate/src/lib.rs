//! `dex50-gate` — login-time access-control gate.
//!
//! The host invokes [`LoginGate::handle_login`] on every successful login.
//! The gate asks the authorization backend for a decision and applies one of
//! two terminal outcomes: allow-and-continue, or deny-and-purge (best-effort
//! account removal, session termination, a single 403 denial response).
//!
//! Nothing in this crate panics or returns an error across the hook
//! boundary; every internal failure is converted into a log line or a
//! fail-closed denial.

pub mod config;
pub mod gate;
pub mod remover;
pub mod terminator;

pub use config::GateConfig;
pub use gate::{DecisionBackend, GateOutcome, LoginGate, VALIDATION_ERROR_REASON};
pub use remover::{RemovalOutcome, RemovalPath, remove_account};
