//! Configuration management for chatctl

use crate::cli::{Cli, OutputFormat};
use crate::errors::CliError;
use chatwire_core::config::{ClientConfig, DEFAULT_API_BASE};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for chatctl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatctlConfig {
    /// Bearer token for the API
    pub api_key: Option<String>,
    /// API base URL
    pub api_base: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Default output format
    pub default_format: OutputFormat,
    /// Model used by `complete` when none is given
    pub completion_model: String,
    /// Model used by `chat` when none is given
    pub chat_model: String,
    /// Model used by `embed` when none is given
    pub embedding_model: String,
}

impl Default for ChatctlConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: 60,
            default_format: OutputFormat::Text,
            completion_model: "text-davinci-003".to_string(),
            chat_model: "gpt-3.5-turbo".to_string(),
            embedding_model: "text-embedding-ada-002".to_string(),
        }
    }
}

impl ChatctlConfig {
    /// Load configuration from defaults, config files and environment
    pub fn load(config_path: &Option<PathBuf>) -> Result<Self, CliError> {
        let mut figment = Figment::from(Serialized::defaults(ChatctlConfig::default()));

        // Load from default config file if it exists
        let default_config_paths = ["chatctl.yaml", "chatctl.yml", ".chatctl.yaml", ".chatctl.yml"];

        for path in &default_config_paths {
            if Path::new(path).exists() {
                figment = figment.merge(Yaml::file(path));
                break;
            }
        }

        // Load from specified config file
        if let Some(path) = config_path {
            if path.exists() {
                figment = figment.merge(Yaml::file(path));
            } else {
                return Err(CliError::Configuration(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
        }

        // The conventional variable, then CHATCTL_-prefixed overrides
        figment = figment
            .merge(Env::raw().only(&["OPENAI_API_KEY"]).map(|_| "api_key".into()))
            .merge(Env::prefixed("CHATCTL_"));

        figment
            .extract()
            .map_err(|e| CliError::Configuration(format!("Failed to parse configuration: {}", e)))
    }

    /// Apply CLI argument overrides to the configuration
    pub fn with_overrides(mut self, args: &Cli) -> Self {
        if let Some(ref api_key) = args.api_key {
            self.api_key = Some(api_key.clone());
        }

        if let Some(ref api_base) = args.api_base {
            self.api_base = api_base.clone();
        }

        if let Some(timeout) = args.timeout {
            self.timeout = timeout;
        }

        if let Some(format) = args.format {
            self.default_format = format;
        }

        self
    }

    /// Build the executor configuration, failing when no API key is set
    pub fn client_config(&self) -> Result<ClientConfig, CliError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                CliError::Configuration(
                    "No API key configured. Use --api-key, OPENAI_API_KEY or api_key in the config file"
                        .to_string(),
                )
            })?;

        Ok(ClientConfig::new(api_key)
            .with_api_base(self.api_base.clone())
            .with_timeout(self.timeout.saturating_mul(1000)))
    }
}
