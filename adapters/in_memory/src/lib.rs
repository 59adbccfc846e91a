//! In-memory implementation of Transport for testing and development
//!
//! Replies are scripted up front and handed out in FIFO order, one per
//! `send`. Every request the transport sees is recorded so tests can assert
//! on URLs, headers and bodies without touching the network.

use async_trait::async_trait;
use chatwire_core::prelude::*;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Configuration for the in-memory transport
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfig {
    /// Simulated network latency applied to every reply
    pub latency: Option<Duration>,
    /// Whether to enable verbose logging
    pub verbose: bool,
}

impl InMemoryConfig {
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

#[derive(Debug, Default)]
struct TransportState {
    /// Scripted replies, consumed front to back
    replies: VecDeque<Result<HttpResponse, TransportError>>,
    /// Requests in the order they were sent
    requests: Vec<HttpRequest>,
}

/// Scripted [`Transport`] double
#[derive(Debug, Clone)]
pub struct InMemoryTransport {
    state: Arc<RwLock<TransportState>>,
    config: InMemoryConfig,
}

impl InMemoryTransport {
    /// Create a new transport with no scripted replies
    pub fn new() -> Self {
        Self::new_with_config(InMemoryConfig::default())
    }

    /// Create a new transport with configuration
    pub fn new_with_config(config: InMemoryConfig) -> Self {
        info!("Creating in-memory transport with config: {:?}", config);
        Self {
            state: Arc::new(RwLock::new(TransportState::default())),
            config,
        }
    }

    /// Queue a raw reply
    pub async fn respond(&self, response: HttpResponse) {
        self.state.write().await.replies.push_back(Ok(response));
    }

    /// Queue a reply whose body is `bytes`
    pub async fn respond_bytes(&self, status: u16, bytes: impl Into<Vec<u8>>) {
        self.respond(HttpResponse::new(status, bytes)).await;
    }

    /// Queue a reply whose body is `value` encoded as JSON
    pub async fn respond_json<V: Serialize>(&self, status: u16, value: &V) -> Result<(), TransportError> {
        let body = serde_json::to_vec(value)
            .map_err(|e| TransportError::InvalidRequest(format!("Failed to encode canned reply: {}", e)))?;
        let response = HttpResponse {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body,
        };
        self.respond(response).await;
        Ok(())
    }

    /// Queue a transport-level failure
    pub async fn fail(&self, error: TransportError) {
        self.state.write().await.replies.push_back(Err(error));
    }

    /// All requests sent so far
    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.state.read().await.requests.clone()
    }

    /// The most recent request, if any
    pub async fn last_request(&self) -> Option<HttpRequest> {
        self.state.read().await.requests.last().cloned()
    }

    /// Get statistics about the transport: (requests sent, replies still queued)
    pub async fn stats(&self) -> (usize, usize) {
        let state = self.state.read().await;
        (state.requests.len(), state.replies.len())
    }

    /// Drop all recorded requests and queued replies
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        *state = TransportState::default();
        info!("Cleared in-memory transport");
    }
}

impl Default for InMemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        if self.config.verbose {
            debug!("{} {} ({} bytes)", request.method, request.url, request.body.len());
        }

        let timeout = request.timeout;
        let reply = {
            let mut state = self.state.write().await;
            state.requests.push(request);
            state.replies.pop_front()
        };

        if let Some(latency) = self.config.latency {
            if latency > timeout {
                tokio::time::sleep(timeout).await;
                return Err(TransportError::Timeout(timeout.as_millis() as u64));
            }
            tokio::time::sleep(latency).await;
        }

        reply.unwrap_or_else(|| {
            Err(TransportError::Network(
                "No scripted reply left in in-memory transport".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chat_query() -> ChatQuery {
        ChatQuery::new("gpt-3.5-turbo", [ChatMessage::user("hi")])
    }

    #[tokio::test]
    async fn test_replies_are_fifo() {
        let transport = InMemoryTransport::new();
        transport.respond_bytes(200, "first").await;
        transport.respond_bytes(200, "second").await;

        let request = HttpRequest::post("http://test", Duration::from_secs(1));
        let first = transport.send(request.clone()).await.unwrap();
        let second = transport.send(request).await.unwrap();

        assert_eq!(first.body, b"first".to_vec());
        assert_eq!(second.body, b"second".to_vec());
        assert_eq!(transport.stats().await, (2, 0));
    }

    #[tokio::test]
    async fn test_exhausted_queue_is_network_error() {
        let transport = InMemoryTransport::new();
        let err = transport
            .send(HttpRequest::post("http://test", Duration::from_secs(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[tokio::test]
    async fn test_client_chats_through_transport() {
        let transport = InMemoryTransport::new();
        transport
            .respond_json(
                200,
                &json!({
                    "id": "chatcmpl-1",
                    "object": "chat.completion",
                    "created": 1700000000,
                    "model": "gpt-3.5-turbo",
                    "choices": [{
                        "index": 0,
                        "message": {"role": "assistant", "content": "Hi there"},
                        "finish_reason": "stop"
                    }],
                    "usage": {"prompt_tokens": 1, "completion_tokens": 2, "total_tokens": 3}
                }),
            )
            .await
            .unwrap();

        let client = OpenAiClient::new("sk-memory", transport.clone());
        let result = client.chats(&chat_query()).await.unwrap();
        assert_eq!(result.first_content(), Some("Hi there"));

        let request = transport.last_request().await.unwrap();
        assert_eq!(request.url, "https://api.openai.com/v1/chat/completions");
        assert_eq!(request.header("authorization"), Some("Bearer sk-memory"));
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(
            body,
            json!({"model": "gpt-3.5-turbo", "messages": [{"role": "user", "content": "hi"}]})
        );
    }

    #[tokio::test]
    async fn test_client_surfaces_each_failure_kind() {
        let transport = InMemoryTransport::new();
        transport
            .respond_json(
                401,
                &json!({"error": {
                    "message": "Incorrect API key provided",
                    "type": "invalid_request_error",
                    "param": null,
                    "code": "invalid_api_key"
                }}),
            )
            .await
            .unwrap();
        transport.respond_bytes(200, Vec::new()).await;
        transport.fail(TransportError::Network("connection refused".to_string())).await;

        let client = OpenAiClient::new("sk-bad", transport.clone());

        let err = client.chats(&chat_query()).await.unwrap_err();
        let api = err.api_error().unwrap();
        assert_eq!(api.code.as_deref(), Some("invalid_api_key"));

        let err = client.chats(&chat_query()).await.unwrap_err();
        assert!(matches!(err, ClientError::EmptyBody));

        let err = client.chats(&chat_query()).await.unwrap_err();
        match err {
            ClientError::Transport(inner) => {
                assert_eq!(inner, TransportError::Network("connection refused".to_string()))
            }
            other => panic!("expected transport error, got {other:?}"),
        }

        assert_eq!(transport.stats().await, (3, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_beyond_timeout_times_out() {
        let transport =
            InMemoryTransport::new_with_config(InMemoryConfig::default().with_latency(Duration::from_secs(90)));
        transport.respond_bytes(200, "{}").await;

        let client = OpenAiClient::new("sk-test", transport.clone());
        let err = client.chats(&chat_query()).await.unwrap_err();
        match err {
            ClientError::Transport(TransportError::Timeout(ms)) => assert_eq!(ms, 60_000),
            other => panic!("expected timeout, got {other:?}"),
        }

        let err = client
            .chats_with_timeout(&chat_query(), Duration::from_secs(120))
            .await
            .unwrap_err();
        // The scripted reply was consumed by the timed-out call
        assert!(matches!(err, ClientError::Transport(TransportError::Network(_))));
    }

    #[tokio::test]
    async fn test_clear() {
        let transport = InMemoryTransport::new();
        transport.respond_bytes(200, "{}").await;
        let _ = transport
            .send(HttpRequest::post("http://test", Duration::from_secs(1)))
            .await;
        transport.respond_bytes(200, "{}").await;

        transport.clear().await;
        assert_eq!(transport.stats().await, (0, 0));
        assert!(transport.last_request().await.is_none());
    }
}
