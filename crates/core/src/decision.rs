//! Access decision value object.
//!
//! One decision is produced per login event and never cached; two decisions
//! with the same fields are interchangeable.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default reason reported for an allowed login when the backend omits one.
pub const DEFAULT_ALLOW_REASON: &str = "OK";
/// Default reason reported for a denied login when the backend omits one.
pub const DEFAULT_DENY_REASON: &str = "Denied";

/// The backend's verdict for a single login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Whether the login may proceed.
    pub allow: bool,
    /// Human-readable reason, always populated (defaulted when the backend
    /// omits it).
    pub reason: String,
}

impl AccessDecision {
    pub fn allow() -> Self {
        Self {
            allow: true,
            reason: DEFAULT_ALLOW_REASON.to_string(),
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allow: false,
            reason: reason.into(),
        }
    }

    /// Build a decision from a parsed backend response body.
    ///
    /// The backend contract is loose on purpose: `allow` is coerced with
    /// JS-style truthiness (absent, `null`, `false`, `0`, `NaN` and `""` all
    /// deny), and a missing or empty `reason` is defaulted contextually.
    /// A body that is valid JSON but not an object (array, scalar) coerces
    /// to a denial, matching the backend's historical behavior.
    pub fn from_json(body: &Value) -> Self {
        let allow = body.get("allow").map(truthy).unwrap_or(false);

        let reason = body
            .get("reason")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                if allow {
                    DEFAULT_ALLOW_REASON.to_string()
                } else {
                    DEFAULT_DENY_REASON.to_string()
                }
            });

        Self { allow, reason }
    }
}

/// JS-style truthiness over a JSON value.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
