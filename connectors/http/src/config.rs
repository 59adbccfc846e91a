//! Configuration for the HTTP connector

use serde::{Deserialize, Serialize};

/// reqwest client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Timeout for establishing a connection, in milliseconds
    pub connect_timeout_ms: u64,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl HttpConfig {
    pub fn new() -> Self {
        Self {
            connect_timeout_ms: 10_000,
            user_agent: format!("chatwire/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, connect_timeout_ms: u64) -> Self {
        self.connect_timeout_ms = connect_timeout_ms;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
