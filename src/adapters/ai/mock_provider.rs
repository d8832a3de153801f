//! Mock AI provider for tests.
//!
//! Queued responses consumed in order, error injection, and call recording.
//! Exhausting the queue yields a fixed default response rather than an error
//! so multi-call handlers (slidedecks) stay testable with short queues.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{
    AiError, AiProvider, CompletionRequest, CompletionResponse, ProviderInfo,
};

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(MockError),
}

/// Injectable error shapes.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AiError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AiError::RateLimited { retry_after_secs },
            MockError::Unavailable { message } => AiError::Unavailable(message),
            MockError::AuthenticationFailed => AiError::AuthenticationFailed,
            MockError::Network { message } => AiError::Network(message),
            MockError::Timeout { timeout_secs } => AiError::Timeout { timeout_secs },
        }
    }
}

/// Configurable mock implementation of the AiProvider port.
#[derive(Debug, Clone, Default)]
pub struct MockAiProvider {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Success(content.into()));
        self
    }

    /// Queues an error response.
    pub fn with_error(self, error: MockError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All recorded requests, in call order.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success("Mock response".to_string()))
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        self.calls.lock().unwrap().push(request);
        match self.next_response() {
            MockResponse::Success(content) => Ok(CompletionResponse {
                content,
                model: "mock-model-1".to_string(),
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-model-1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Message;

    fn request() -> CompletionRequest {
        CompletionRequest::new().with_message(Message::user("hello"))
    }

    #[tokio::test]
    async fn returns_responses_in_order() {
        let provider = MockAiProvider::new()
            .with_response("First")
            .with_response("Second");

        assert_eq!(provider.complete(request()).await.unwrap().content, "First");
        assert_eq!(provider.complete(request()).await.unwrap().content, "Second");
    }

    #[tokio::test]
    async fn returns_default_after_exhausted() {
        let provider = MockAiProvider::new().with_response("Only one");
        provider.complete(request()).await.unwrap();
        let second = provider.complete(request()).await.unwrap();
        assert_eq!(second.content, "Mock response");
    }

    #[tokio::test]
    async fn injects_errors() {
        let provider = MockAiProvider::new().with_error(MockError::AuthenticationFailed);
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, AiError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn records_calls() {
        let provider = MockAiProvider::new();
        assert_eq!(provider.call_count(), 0);
        provider.complete(request()).await.unwrap();
        provider.complete(request()).await.unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.get_calls()[0].messages[0].content, "hello");
    }
}
