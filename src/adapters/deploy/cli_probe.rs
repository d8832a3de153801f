//! Deployment CLI auth probe.
//!
//! Runs `deployctl whoami` and reads the account name off stdout. A non-zero
//! exit means "not logged in"; a missing binary is reported as unavailable
//! and handlers treat both the same way.

use async_trait::async_trait;
use tokio::process::Command;

use crate::ports::{DeployAuth, DeployAuthError};

const DEPLOY_TOOL: &str = "deployctl";

/// Probes deployment auth by invoking the deployment CLI.
#[derive(Debug, Clone, Default)]
pub struct CliDeployAuth;

impl CliDeployAuth {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DeployAuth for CliDeployAuth {
    async fn whoami(&self) -> Result<Option<String>, DeployAuthError> {
        let output = Command::new(DEPLOY_TOOL)
            .arg("whoami")
            .output()
            .await
            .map_err(|e| DeployAuthError::ToolUnavailable(e.to_string()))?;

        if !output.status.success() {
            return Ok(None);
        }

        let account = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if account.is_empty() {
            Ok(None)
        } else {
            Ok(Some(account))
        }
    }
}

/// Fixed-state probe for tests and offline use.
#[derive(Debug, Clone, Default)]
pub struct StaticDeployAuth {
    account: Option<String>,
}

impl StaticDeployAuth {
    /// A probe that always reports `account` as logged in.
    pub fn logged_in(account: impl Into<String>) -> Self {
        Self {
            account: Some(account.into()),
        }
    }

    /// A probe that always reports "not logged in".
    pub fn logged_out() -> Self {
        Self { account: None }
    }
}

#[async_trait]
impl DeployAuth for StaticDeployAuth {
    async fn whoami(&self) -> Result<Option<String>, DeployAuthError> {
        Ok(self.account.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_probe_reports_fixed_state() {
        let auth = StaticDeployAuth::logged_in("teacher@example.com");
        assert_eq!(
            auth.whoami().await.unwrap().as_deref(),
            Some("teacher@example.com")
        );

        let auth = StaticDeployAuth::logged_out();
        assert!(auth.whoami().await.unwrap().is_none());
    }
}
