//! AI provider adapters.

mod anthropic_provider;
mod mock_provider;
mod openai_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use mock_provider::{MockAiProvider, MockError, MockResponse};
pub use openai_provider::{OpenAiConfig, OpenAiProvider};

use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::config::{AiConfig, AiProviderKind};
use crate::ports::{AiError, AiProvider};

/// Builds the configured provider, or `None` when no matching key is set.
///
/// A key-less configuration is not an error; the engine runs on its
/// deterministic paths without a provider.
pub fn provider_from_config(config: &AiConfig) -> Result<Option<Arc<dyn AiProvider>>, AiError> {
    if !config.is_configured() {
        return Ok(None);
    }
    let provider: Arc<dyn AiProvider> = match config.provider {
        AiProviderKind::Anthropic => {
            let key = config
                .anthropic_api_key
                .as_ref()
                .map(|k| k.expose_secret().clone())
                .unwrap_or_default();
            let mut ac = AnthropicConfig::new(key)
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries);
            if let Some(model) = &config.model {
                ac = ac.with_model(model);
            }
            Arc::new(AnthropicProvider::new(ac)?)
        }
        AiProviderKind::OpenAI => {
            let key = config
                .openai_api_key
                .as_ref()
                .map(|k| k.expose_secret().clone())
                .unwrap_or_default();
            let mut oc = OpenAiConfig::new(key)
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries);
            if let Some(model) = &config.model {
                oc = oc.with_model(model);
            }
            Arc::new(OpenAiProvider::new(oc)?)
        }
    };
    Ok(Some(provider))
}
