//! Deploy Auth Port - the deployment precondition probe.
//!
//! A "who am I" check against the deployment tool, consulted before any
//! build/deploy commands are emitted. The probe is read-only; the engine
//! still performs no authentication itself and emits no auth commands.

use async_trait::async_trait;

/// Port for the deployment authentication probe.
#[async_trait]
pub trait DeployAuth: Send + Sync {
    /// Returns the authenticated account name, or `None` when the deployment
    /// tool is not logged in.
    async fn whoami(&self) -> Result<Option<String>, DeployAuthError>;
}

/// Probe errors. A failed probe is treated the same as "not authenticated"
/// by handlers: no deploy commands are emitted.
#[derive(Debug, thiserror::Error)]
pub enum DeployAuthError {
    #[error("deployment tool not installed or not runnable: {0}")]
    ToolUnavailable(String),

    #[error("probe failed: {0}")]
    ProbeFailed(String),
}
