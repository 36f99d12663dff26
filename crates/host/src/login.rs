//! The login event handed to the gate on each successful authentication.

use chrono::{DateTime, Utc};

use dex50_core::{Account, Domain, RequestId};

use crate::response::ResponseChannel;
use crate::session::Session;

/// A successful-login event, owned by the host for the duration of the hook
/// invocation.
///
/// The session and response handles are borrowed mutably from the host;
/// the gate only acts on them within this event's lifetime.
pub struct LoginEvent<'a> {
    /// Correlation id for log lines produced while handling this event.
    pub request_id: RequestId,
    /// The authenticated account.
    pub account: Account,
    /// Tenant context the login happened in.
    pub domain: Domain,
    /// Mutable session handle, when one is attached to the request.
    pub session: Option<&'a mut dyn Session>,
    /// Write-once outbound response channel.
    pub response: &'a mut dyn ResponseChannel,
    /// When the host observed the successful authentication.
    pub occurred_at: DateTime<Utc>,
}

impl<'a> LoginEvent<'a> {
    /// Build an event with a fresh correlation id and the current time.
    pub fn new(
        account: Account,
        domain: Domain,
        session: Option<&'a mut dyn Session>,
        response: &'a mut dyn ResponseChannel,
    ) -> Self {
        Self {
            request_id: RequestId::new(),
            account,
            domain,
            session,
            response,
            occurred_at: Utc::now(),
        }
    }
}
