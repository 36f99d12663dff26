//! Backend client configuration.

use std::time::Duration;

/// Fixed production endpoint used when no override is configured.
pub const DEFAULT_ENDPOINT: &str = "https://access.dex50.net/api/check";

/// Environment override for the backend base URL.
pub const ENV_ACCESS_URL: &str = "DEX50_ACCESS_URL";

/// Environment opt-out of TLS certificate verification (lab endpoints only).
pub const ENV_INSECURE_TLS: &str = "DEX50_INSECURE_TLS";

/// Configuration for [`crate::DecisionClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL of the decision endpoint; the email is appended as a query
    /// parameter.
    pub base_url: String,
    /// Overall per-attempt request timeout.
    pub request_timeout: Duration,
    /// Connection-establishment timeout.
    pub connect_timeout: Duration,
    /// Additional attempts after the first failure. Bounded by design: the
    /// backend must not be hammered when it is flaky.
    pub retries: u32,
    /// Pause before a retry attempt.
    pub retry_backoff: Duration,
    /// Skip TLS certificate verification. Defaults to `false`; enabling it
    /// is an explicit, logged decision.
    pub danger_accept_invalid_certs: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(3),
            retries: 1,
            retry_backoff: Duration::from_millis(250),
            danger_accept_invalid_certs: false,
        }
    }
}

impl BackendConfig {
    /// Build the configuration from the process environment.
    ///
    /// `DEX50_ACCESS_URL` overrides the endpoint; `DEX50_INSECURE_TLS=1`
    /// disables certificate verification and logs a warning.
    pub fn from_env() -> Self {
        let base_url = std::env::var(ENV_ACCESS_URL).unwrap_or_else(|_| {
            tracing::debug!("{} not set; using production endpoint", ENV_ACCESS_URL);
            DEFAULT_ENDPOINT.to_string()
        });

        let danger_accept_invalid_certs = std::env::var(ENV_INSECURE_TLS)
            .map(|v| flag_enabled(&v))
            .unwrap_or(false);
        if danger_accept_invalid_certs {
            tracing::warn!(
                "{} is set; TLS certificate verification is DISABLED for the decision backend",
                ENV_INSECURE_TLS
            );
        }

        Self {
            base_url,
            danger_accept_invalid_certs,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retries(mut self, retries: u32, backoff: Duration) -> Self {
        self.retries = retries;
        self.retry_backoff = backoff;
        self
    }
}

fn flag_enabled(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}
