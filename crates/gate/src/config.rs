//! Process-wide gate policy configuration.

use dex50_backend::BackendConfig;

/// Environment override for the hard-delete policy (enabled by default;
/// set to `0`/`false`/`no`/`off` to deny without purging the account).
pub const ENV_HARD_DELETE: &str = "DEX50_HARD_DELETE";

/// Policy configuration for [`crate::LoginGate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Decision backend configuration.
    pub backend: BackendConfig,
    /// Whether an explicit denial also removes the account from the host's
    /// user store.
    pub hard_delete: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            hard_delete: true,
        }
    }
}

impl GateConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Self {
        let hard_delete = std::env::var(ENV_HARD_DELETE)
            .map(|v| !flag_disabled(&v))
            .unwrap_or(true);
        if !hard_delete {
            tracing::info!(
                "{} disables hard delete; denied accounts will be kept in the user store",
                ENV_HARD_DELETE
            );
        }

        Self {
            backend: BackendConfig::from_env(),
            hard_delete,
        }
    }

    pub fn without_hard_delete(mut self) -> Self {
        self.hard_delete = false;
        self
    }
}

fn flag_disabled(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
