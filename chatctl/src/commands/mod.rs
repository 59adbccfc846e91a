//! Subcommand implementations

pub mod chat;
pub mod complete;
pub mod embed;
pub mod image;

use crate::config::ChatctlConfig;
use crate::errors::CliError;
use chatwire_connector_http::HttpTransport;
use chatwire_core::OpenAiClient;

/// Build a client that talks to the configured host over HTTPS
pub fn build_client(config: &ChatctlConfig) -> Result<OpenAiClient<HttpTransport>, CliError> {
    let client_config = config.client_config()?;
    let transport = HttpTransport::new()?;
    Ok(OpenAiClient::with_config(client_config, transport))
}
