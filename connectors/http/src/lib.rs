//! reqwest-backed Transport for Chatwire
//!
//! Any HTTP status is reported back as a response; only failures to get a
//! response at all become a [`TransportError`].

use async_trait::async_trait;
use chatwire_core::prelude::*;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

mod config;

pub use config::HttpConfig;

/// HTTPS implementation of [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new transport with default settings
    pub fn new() -> Result<Self, TransportError> {
        Self::new_with_config(HttpConfig::default())
    }

    /// Create a new transport with configuration
    pub fn new_with_config(config: HttpConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Post => reqwest::Method::POST,
    }
}

fn map_error(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout.as_millis() as u64)
    } else if err.is_builder() {
        TransportError::InvalidRequest(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;

        debug!("{} {} ({} bytes, timeout {:?})", method, url, body.len(), timeout);

        let mut builder = self
            .client
            .request(to_reqwest_method(method), &url)
            .timeout(timeout)
            .body(body);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| map_error(e, timeout))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| map_error(e, timeout))?
            .to_vec();

        debug!("{} responded with status {} ({} bytes)", url, status, body.len());

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenAiClient<HttpTransport> {
        let config = ClientConfig::new("test-key").with_api_base(server.uri());
        OpenAiClient::with_config(config, HttpTransport::new().unwrap())
    }

    #[tokio::test]
    async fn test_http_transport_creation() {
        let transport = HttpTransport::new_with_config(
            HttpConfig::new().with_connect_timeout(500).with_user_agent("chatwire-test"),
        );
        assert!(transport.is_ok());
    }

    #[tokio::test]
    async fn test_chat_completion_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "model": "gpt-3.5-turbo",
                "messages": [{"role": "user", "content": "hi"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-xyz",
                "object": "chat.completion",
                "created": 1677652288,
                "model": "gpt-3.5-turbo",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "Hello!"},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 9, "completion_tokens": 2, "total_tokens": 11}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let query = ChatQuery::new("gpt-3.5-turbo", [ChatMessage::user("hi")]);
        let result = client.chats(&query).await.unwrap();

        assert_eq!(result.first_content(), Some("Hello!"));
        assert_eq!(result.usage.map(|u| u.total_tokens), Some(11));
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {
                    "message": "Rate limit reached",
                    "type": "requests",
                    "param": null,
                    "code": "rate_limit_exceeded"
                }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .embeddings(&EmbeddingsQuery::new("text-embedding-ada-002", "hello"))
            .await
            .unwrap_err();

        let api = err.api_error().expect("expected API error");
        assert_eq!(api.message, "Rate limit reached");
        assert_eq!(api.code.as_deref(), Some("rate_limit_exceeded"));
    }

    #[tokio::test]
    async fn test_empty_response_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.images(&ImagesQuery::new("a cat")).await.unwrap_err();
        assert!(matches!(err, ClientError::EmptyBody));
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .completions_with_timeout(
                &CompletionsQuery::new("text-davinci-003", "hello"),
                Duration::from_millis(50),
            )
            .await
            .unwrap_err();

        match err {
            ClientError::Transport(TransportError::Timeout(ms)) => assert_eq!(ms, 50),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let config = ClientConfig::new("test-key").with_api_base("http://127.0.0.1:9");
        let client = OpenAiClient::with_config(config, HttpTransport::new().unwrap());

        let err = client
            .chats(&ChatQuery::new("gpt-4", [ChatMessage::user("hi")]))
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }
}
