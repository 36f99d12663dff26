//! `dex50-core` — domain foundation for the DEX50 login gate.
//!
//! This crate contains **pure domain** primitives (no IO, no host coupling).

pub mod account;
pub mod decision;
pub mod error;
pub mod id;

pub use account::Account;
pub use decision::AccessDecision;
pub use error::{DomainError, DomainResult};
pub use id::{Domain, RequestId};
