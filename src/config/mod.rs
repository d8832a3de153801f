//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `SITEPILOT` prefix and nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use sitepilot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod grounding;

pub use ai::{AiConfig, AiProviderKind};
pub use error::{ConfigError, ValidationError};
pub use grounding::GroundingConfig;

use serde::Deserialize;

/// Root engine configuration.
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Everything has a sensible default; an empty environment yields a working
/// engine with the generative path disabled.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// AI provider configuration (OpenAI/Anthropic)
    #[serde(default)]
    pub ai: AiConfig,

    /// Resource-grounding limits
    #[serde(default)]
    pub grounding: GroundingConfig,

    /// Maximum conversation turns kept for generative continuity
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads environment variables with
    /// the `SITEPILOT` prefix: `SITEPILOT__AI__ANTHROPIC_API_KEY=...` maps to
    /// `ai.anthropic_api_key`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SITEPILOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.grounding.validate()?;
        if self.history_limit == 0 {
            return Err(ValidationError::InvalidHistoryLimit);
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai: AiConfig::default(),
            grounding: GroundingConfig::default(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_history_limit() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = AppConfig::default();
        assert_eq!(config.history_limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_history_limit_rejected() {
        let config = AppConfig {
            history_limit: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidHistoryLimit)
        ));
    }
}
