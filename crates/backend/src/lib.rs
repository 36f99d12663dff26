//! `dex50-backend` — HTTP client for the external authorization backend.
//!
//! One request shape, one response shape: `GET <base>?email=<encoded>`
//! answered by `{ "allow": <truthy>, "reason"?: <string> }`.

pub mod client;
pub mod config;

pub use client::{BackendError, DecisionClient};
pub use config::BackendConfig;
