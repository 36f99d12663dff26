//! Best-effort session termination and denial response.
//!
//! Everything here is non-fatal by contract: teardown and write failures are
//! logged and swallowed so the hook can always run to completion.

use dex50_host::{ResponseChannel, Session};

/// Status written on denial.
pub const DENIAL_STATUS: u16 = 403;

/// Content type of the denial body.
pub const DENIAL_CONTENT_TYPE: &str = "text/plain";

/// The fixed denial body for a given reason.
pub fn denial_body(reason: &str) -> String {
    format!("Access denied by DEX50: {reason}")
}

/// Terminate the session (if any) and write the 403 denial response.
///
/// Skips the write when the host already committed a response, avoiding a
/// double-write fault. Idempotent with respect to the session handle.
pub fn deny(
    session: Option<&mut (dyn Session + '_)>,
    response: &mut dyn ResponseChannel,
    reason: &str,
) {
    if let Some(session) = session {
        if let Err(err) = session.invalidate() {
            tracing::debug!(error = %err, "session teardown failed; continuing with denial");
        }
    }

    if response.is_committed() {
        tracing::debug!("response already committed; denial body not written");
        return;
    }

    if let Err(err) = response.send(DENIAL_STATUS, DENIAL_CONTENT_TYPE, &denial_body(reason)) {
        tracing::warn!(error = %err, "failed to write denial response");
    }
}
