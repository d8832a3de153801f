//! OpenAI implementation of the AiProvider port.
//!
//! Non-streaming Chat Completions calls; same retry discipline as the
//! Anthropic adapter.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AiError, AiProvider, CompletionRequest, CompletionResponse, MessageRole, ProviderInfo,
};

const DEFAULT_MODEL: &str = "gpt-4o";

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    api_key: SecretString,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: "https://api.openai.com".to_string(),
            timeout: Duration::from_secs(120),
            max_retries: 3,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI Chat Completions provider.
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self, AiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::InvalidRequest(format!("http client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url)
    }

    fn to_api_request(&self, request: &CompletionRequest) -> ApiRequest {
        let mut messages = Vec::new();
        // OpenAI carries system instructions as the leading message.
        if let Some(system) = &request.system_prompt {
            messages.push(ApiMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        for m in &request.messages {
            messages.push(ApiMessage {
                role: match m.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: m.content.clone(),
            });
        }

        ApiRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn send(&self, request: &CompletionRequest) -> Result<Response, AiError> {
        self.client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&self.to_api_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else {
                    AiError::network(e.to_string())
                }
            })
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => AiError::AuthenticationFailed,
                429 => AiError::RateLimited { retry_after_secs: 20 },
                400 => AiError::InvalidRequest(body),
                500..=599 => AiError::unavailable(format!("server error {}: {}", status, body)),
                _ => AiError::network(format!("unexpected status {}: {}", status, body)),
            });
        }

        let api: ApiResponse = response
            .json()
            .await
            .map_err(|e| AiError::parse(format!("response body: {}", e)))?;

        let content = api
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AiError::parse("response had no choices"))?;

        Ok(CompletionResponse {
            content,
            model: api.model,
        })
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        let mut last_error = AiError::network("no attempts made");

        for attempt in 0..=self.config.max_retries {
            let result = match self.send(&request).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };
            match result {
                Ok(completion) => return Ok(completion),
                Err(err) => {
                    if !err.is_retryable() || attempt >= self.config.max_retries {
                        return Err(err);
                    }
                    tracing::warn!(attempt, error = %err, "openai request failed, retrying");
                    last_error = err;
                }
            }
            sleep(Duration::from_secs(1 << attempt)).await;
        }

        Err(last_error)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai", &self.config.model)
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    model: String,
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Message;

    #[test]
    fn system_prompt_becomes_leading_message() {
        let provider = OpenAiProvider::new(OpenAiConfig::new("k")).unwrap();
        let request = CompletionRequest::new()
            .with_system_prompt("be brief")
            .with_message(Message::user("hi"));
        let api = provider.to_api_request(&request);
        assert_eq!(api.messages[0].role, "system");
        assert_eq!(api.messages[1].role, "user");
    }

    #[test]
    fn provider_info_names_model() {
        let provider =
            OpenAiProvider::new(OpenAiConfig::new("k").with_model("gpt-4o-mini")).unwrap();
        let info = provider.provider_info();
        assert_eq!(info.name, "openai");
        assert_eq!(info.model, "gpt-4o-mini");
    }
}
