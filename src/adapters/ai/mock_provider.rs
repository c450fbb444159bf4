//! Mock AI Provider for testing.
//!
//! Provides a configurable mock implementation of the AIProvider port,
//! allowing tests to run without calling real AI APIs.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Simulated delays
//! - Error injection
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response(r#"{"response": "Hi!", "extraction": null}"#);
//!
//! let response = provider.complete(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Mock AI provider for testing.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful completion.
    Success { content: String },
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    ContentFiltered { reason: String },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::ContentFiltered { reason } => AIError::content_filtered(reason),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success {
            content: content.into(),
        });
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error));
        self
    }

    /// Queues another response on an already shared provider.
    pub fn push(&self, response: MockResponse) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .ok()
            .and_then(|mut r| r.pop_front())
            .unwrap_or_else(|| MockResponse::Success {
                content: r#"{"response": "Mock response", "extraction": null}"#.to_string(),
            })
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request);
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success { content } => Ok(CompletionResponse {
                content,
                usage: TokenUsage::new(10, 20),
                model: self.info.model.clone(),
                finish_reason: FinishReason::Stop,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MessageRole;
    use secrecy::SecretString;

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest::new(SecretString::new("k".to_string()))
            .with_message(MessageRole::User, text)
    }

    #[tokio::test]
    async fn returns_configured_responses_in_order() {
        let provider = MockAIProvider::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(provider.complete(request("a")).await.unwrap().content, "first");
        assert_eq!(provider.complete(request("b")).await.unwrap().content, "second");
    }

    #[tokio::test]
    async fn falls_back_to_default_response() {
        let provider = MockAIProvider::new();
        let response = provider.complete(request("a")).await.unwrap();
        assert!(response.content.contains("Mock response"));
    }

    #[tokio::test]
    async fn injects_errors() {
        let provider = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let result = provider.complete(request("a")).await;
        assert!(matches!(result, Err(AIError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn tracks_calls() {
        let provider = MockAIProvider::new();
        provider.complete(request("hello")).await.unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.get_calls()[0].messages[0].content, "hello");
    }

    #[tokio::test]
    async fn clones_share_queue_and_history() {
        let provider = MockAIProvider::new();
        let handle = provider.clone();
        handle.push(MockResponse::Success {
            content: "queued later".to_string(),
        });

        let response = provider.complete(request("a")).await.unwrap();

        assert_eq!(response.content, "queued later");
        assert_eq!(handle.call_count(), 1);
    }

    #[tokio::test]
    async fn simulated_delay_is_applied() {
        let provider = MockAIProvider::new().with_delay(Duration::from_millis(20));
        let start = std::time::Instant::now();
        provider.complete(request("a")).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
