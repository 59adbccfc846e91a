//! # Chatwire Core
//!
//! Typed schemas and the request executor for the OpenAI completions, images,
//! embeddings and chat endpoints. The executor talks to the network only
//! through the [`Transport`] trait, so any HTTP stack (or a test double) can
//! be plugged in.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod errors;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use client::{decode_response, OpenAiClient};
pub use config::ClientConfig;
pub use endpoint::Endpoint;
pub use errors::{ClientError, ClientResult, TransportError, TransportResult};
pub use traits::{HttpRequest, HttpResponse, Method, Transport};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::*;
    pub use crate::config::*;
    pub use crate::endpoint::*;
    pub use crate::errors::*;
    pub use crate::traits::*;
    pub use crate::types::*;
    pub use async_trait::async_trait;
}
