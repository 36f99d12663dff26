//! The login gate orchestrator.

use std::future::Future;

use dex50_backend::{BackendError, DecisionClient};
use dex50_core::AccessDecision;
use dex50_host::{LoginEvent, UserStore};

use crate::config::GateConfig;
use crate::remover::{RemovalOutcome, remove_account};
use crate::terminator;

/// Generic denial reason used whenever the backend check itself fails.
/// Backend error details stay in the logs, never in the user-visible body.
pub const VALIDATION_ERROR_REASON: &str = "Validation error";

/// Source of access decisions.
///
/// [`DecisionClient`] is the production implementation; the seam exists so
/// gate behavior can be tested without a network.
pub trait DecisionBackend {
    fn check(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<AccessDecision, BackendError>> + Send;
}

impl DecisionBackend for DecisionClient {
    fn check(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<AccessDecision, BackendError>> + Send {
        DecisionClient::check(self, email)
    }
}

/// Terminal outcome of one hook invocation.
///
/// The host ignores this value; it exists for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Backend allowed the login; nothing was written.
    Allowed { reason: String },
    /// The account has neither email nor name; allowed without consulting
    /// the backend (the documented fail-open exception).
    AllowedMissingIdentity,
    /// Login denied; a 403 was written (unless the host had already
    /// committed a response).
    Denied {
        reason: String,
        /// `Some` when the hard-delete policy triggered a removal attempt.
        removal: Option<RemovalOutcome>,
    },
}

impl GateOutcome {
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied { .. })
    }
}

/// Login-time access-control gate.
///
/// Stateless per event: one decision is fetched per login, exactly one
/// terminal action is applied, and no error escapes [`Self::handle_login`].
#[derive(Debug, Clone)]
pub struct LoginGate<B = DecisionClient> {
    backend: B,
    hard_delete: bool,
}

impl LoginGate<DecisionClient> {
    /// Production gate from the process environment.
    pub fn from_env() -> Result<Self, BackendError> {
        Self::from_config(GateConfig::from_env())
    }

    /// Production gate from an explicit configuration.
    pub fn from_config(config: GateConfig) -> Result<Self, BackendError> {
        let backend = DecisionClient::new(config.backend)?;
        Ok(Self {
            backend,
            hard_delete: config.hard_delete,
        })
    }
}

impl<B: DecisionBackend> LoginGate<B> {
    pub fn new(backend: B, hard_delete: bool) -> Self {
        Self {
            backend,
            hard_delete,
        }
    }

    /// The login hook: resolve identity, fetch the decision, apply it.
    ///
    /// Always runs to completion. Fail-closed on any backend failure;
    /// fail-open only when the account carries no usable identity.
    pub async fn handle_login(
        &self,
        store: &mut dyn UserStore,
        event: &mut LoginEvent<'_>,
    ) -> GateOutcome {
        let Some(email) = event.account.login_identity().map(str::to_string) else {
            tracing::warn!(
                request_id = %event.request_id,
                domain = %event.domain,
                account_id = %event.account.id,
                "account has neither email nor name; allowing login without a backend check"
            );
            return GateOutcome::AllowedMissingIdentity;
        };

        match self.backend.check(&email).await {
            Ok(decision) if decision.allow => {
                tracing::info!(
                    request_id = %event.request_id,
                    domain = %event.domain,
                    email = %email,
                    reason = %decision.reason,
                    "login allowed by decision backend"
                );
                GateOutcome::Allowed {
                    reason: decision.reason,
                }
            }
            Ok(decision) => {
                tracing::info!(
                    request_id = %event.request_id,
                    domain = %event.domain,
                    email = %email,
                    reason = %decision.reason,
                    "login denied by decision backend"
                );

                // Removal is tied to an explicit denial only; backend errors
                // below never touch the store.
                let removal = self
                    .hard_delete
                    .then(|| remove_account(store, &event.account));

                terminator::deny(
                    event.session.as_deref_mut(),
                    &mut *event.response,
                    &decision.reason,
                );
                GateOutcome::Denied {
                    reason: decision.reason,
                    removal,
                }
            }
            Err(err) => {
                tracing::error!(
                    request_id = %event.request_id,
                    domain = %event.domain,
                    email = %email,
                    error = %err,
                    "decision backend check failed; denying login"
                );

                terminator::deny(
                    event.session.as_deref_mut(),
                    &mut *event.response,
                    VALIDATION_ERROR_REASON,
                );
                GateOutcome::Denied {
                    reason: VALIDATION_ERROR_REASON.to_string(),
                    removal: None,
                }
            }
        }
    }
}
