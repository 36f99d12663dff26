//! Decision backend HTTP client.

use thiserror::Error;

use dex50_core::AccessDecision;

use crate::config::BackendConfig;

/// How much of a bad response body is kept for diagnostics.
const SNIPPET_LIMIT: usize = 256;

/// Failure while obtaining a decision from the backend.
///
/// These never reach the end user verbatim; the gate maps every variant to
/// a generic denial reason.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// DNS, TLS, connect, timeout or mid-stream transport failure.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The backend answered with a status other than 200.
    #[error("unexpected status {status}: {snippet}")]
    UnexpectedStatus { status: u16, snippet: String },

    /// The backend answered 200 with a body that is not well-formed JSON.
    #[error("malformed response body: {snippet}")]
    MalformedBody { snippet: String },

    /// The client itself could not be constructed.
    #[error("invalid backend configuration: {0}")]
    InvalidConfig(String),
}

impl BackendError {
    /// Whether a retry could plausibly change the outcome.
    ///
    /// Transport failures and 5xx answers are transient; 4xx answers and
    /// malformed bodies are deterministic and retried never.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::UnexpectedStatus { status, .. } => *status >= 500,
            Self::MalformedBody { .. } | Self::InvalidConfig(_) => false,
        }
    }
}

/// Client for the authorization decision endpoint.
///
/// Holds a pooled `reqwest` client; cheap to clone and safe to share across
/// concurrent login events.
#[derive(Debug, Clone)]
pub struct DecisionClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl DecisionClient {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .danger_accept_invalid_certs(config.danger_accept_invalid_certs)
            .build()
            .map_err(|e| BackendError::InvalidConfig(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Build a client from the process environment.
    pub fn from_env() -> Result<Self, BackendError> {
        Self::new(BackendConfig::from_env())
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Fetch the access decision for `email`.
    ///
    /// Performs at most `1 + retries` attempts; retryable failures back off
    /// between attempts, and exhaustion surfaces the last error.
    pub async fn check(&self, email: &str) -> Result<AccessDecision, BackendError> {
        let mut attempt: u32 = 0;
        loop {
            match self.check_once(email).await {
                Ok(decision) => return Ok(decision),
                Err(err) if err.is_retryable() && attempt < self.config.retries => {
                    attempt += 1;
                    tracing::warn!(
                        error = %err,
                        attempt,
                        max_retries = self.config.retries,
                        "decision backend request failed; retrying"
                    );
                    tokio::time::sleep(self.config.retry_backoff).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn check_once(&self, email: &str) -> Result<AccessDecision, BackendError> {
        let response = self
            .http
            .get(self.config.base_url.as_str())
            .query(&[("email", email)])
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if status != reqwest::StatusCode::OK {
            return Err(BackendError::UnexpectedStatus {
                status: status.as_u16(),
                snippet: snippet(&body),
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|_| BackendError::MalformedBody {
                snippet: snippet(&body),
            })?;

        Ok(AccessDecision::from_json(&value))
    }
}

/// Truncate a response body for inclusion in error messages.
fn snippet(body: &str) -> String {
    if body.chars().count() <= SNIPPET_LIMIT {
        body.to_string()
    } else {
        let mut s: String = body.chars().take(SNIPPET_LIMIT).collect();
        s.push('…');
        s
    }
}
