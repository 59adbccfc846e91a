//! Request executor: one generic "send, then decode success-or-error" flow
//! instantiated for each endpoint

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::errors::{ClientError, ClientResult};
use crate::traits::{HttpRequest, Transport};
use crate::types::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Typed client for the completions, images, embeddings and chat endpoints
///
/// Holds only immutable state, so a single instance can serve concurrent
/// calls. Each call performs exactly one transport round trip.
#[derive(Debug, Clone)]
pub struct OpenAiClient<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> OpenAiClient<T> {
    /// Create a client for the hosted service with default settings
    pub fn new(api_key: impl Into<String>, transport: T) -> Self {
        Self::with_config(ClientConfig::new(api_key), transport)
    }

    pub fn with_config(config: ClientConfig, transport: T) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn completions(&self, query: &CompletionsQuery) -> ClientResult<CompletionsResult> {
        self.completions_with_timeout(query, self.config.timeout()).await
    }

    pub async fn completions_with_timeout(
        &self,
        query: &CompletionsQuery,
        timeout: Duration,
    ) -> ClientResult<CompletionsResult> {
        self.perform(Endpoint::Completions, query, timeout).await
    }

    pub async fn images(&self, query: &ImagesQuery) -> ClientResult<ImagesResult> {
        self.images_with_timeout(query, self.config.timeout()).await
    }

    pub async fn images_with_timeout(
        &self,
        query: &ImagesQuery,
        timeout: Duration,
    ) -> ClientResult<ImagesResult> {
        self.perform(Endpoint::Images, query, timeout).await
    }

    pub async fn embeddings(&self, query: &EmbeddingsQuery) -> ClientResult<EmbeddingsResult> {
        self.embeddings_with_timeout(query, self.config.timeout()).await
    }

    pub async fn embeddings_with_timeout(
        &self,
        query: &EmbeddingsQuery,
        timeout: Duration,
    ) -> ClientResult<EmbeddingsResult> {
        self.perform(Endpoint::Embeddings, query, timeout).await
    }

    pub async fn chats(&self, query: &ChatQuery) -> ClientResult<ChatResult> {
        self.chats_with_timeout(query, self.config.timeout()).await
    }

    pub async fn chats_with_timeout(
        &self,
        query: &ChatQuery,
        timeout: Duration,
    ) -> ClientResult<ChatResult> {
        self.perform(Endpoint::Chats, query, timeout).await
    }

    /// Send `query` to `endpoint` and decode the response as `R`
    pub async fn perform<Q, R>(
        &self,
        endpoint: Endpoint,
        query: &Q,
        timeout: Duration,
    ) -> ClientResult<R>
    where
        Q: Serialize + Sync,
        R: DeserializeOwned,
    {
        let request = self.build_request(endpoint, query, timeout)?;
        debug!("POST {} ({} bytes)", request.url, request.body.len());

        let response = self.transport.send(request).await?;
        debug!(
            "{} responded with status {} ({} bytes)",
            endpoint,
            response.status,
            response.body.len()
        );

        decode_response(&response.body)
    }

    /// Build the request descriptor for `query` without sending it
    pub fn build_request<Q: Serialize>(
        &self,
        endpoint: Endpoint,
        query: &Q,
        timeout: Duration,
    ) -> ClientResult<HttpRequest> {
        let body = serde_json::to_vec(query).map_err(ClientError::Encode)?;

        Ok(HttpRequest::post(endpoint.url(&self.config.api_base), timeout)
            .with_header("Content-Type", "application/json")
            .with_header("Authorization", format!("Bearer {}", self.config.api_key))
            .with_body(body))
    }
}

/// Decode a response body as `R`, falling back to the API error envelope
///
/// When the body is neither shape, the failure from decoding `R` is returned.
pub fn decode_response<R: DeserializeOwned>(body: &[u8]) -> ClientResult<R> {
    if body.is_empty() {
        return Err(ClientError::EmptyBody);
    }

    match serde_json::from_slice::<R>(body) {
        Ok(result) => Ok(result),
        Err(decode_err) => match serde_json::from_slice::<ApiErrorResponse>(body) {
            Ok(envelope) => Err(ClientError::Api(envelope.error)),
            Err(_) => Err(ClientError::Decode(decode_err)),
        },
    }
}
