//! Configuration for the request executor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base URL of the hosted service
pub const DEFAULT_API_BASE: &str = "https://api.openai.com";

/// Default per-request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Bearer token sent with every request
    pub api_key: String,
    /// Scheme and host the endpoint paths are appended to
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Request timeout in milliseconds, forwarded to the transport
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl ClientConfig {
    /// Create a new config with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: default_api_base(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Set the API base URL (for OpenAI-compatible hosts or a local mock)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the default request timeout
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("") // Empty API key - must be set by user
    }
}
