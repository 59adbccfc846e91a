//! Error types for Chatwire client operations

use crate::types::ApiError;
use thiserror::Error;

/// Main error type returned by every executor operation
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Response body was empty")]
    EmptyBody,

    #[error("API error: {0}")]
    Api(ApiError),

    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ClientError {
    /// The remote API error, if the service rejected the request
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the failure happened before any response body was received
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

/// Errors reported by a [`Transport`](crate::traits::Transport) implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Transport error: {0}")]
    Other(String),
}

/// Result type alias for executor operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
