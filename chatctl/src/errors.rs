//! Error type for chatctl

use chatwire_core::{ClientError, TransportError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Failed to set up transport: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}
