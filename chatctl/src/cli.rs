//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chatctl")]
#[command(about = "Call the OpenAI completions, chat, images and embeddings endpoints")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API key used as the bearer token
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API base URL (scheme and host)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a text completion for a prompt
    Complete(CompleteArgs),
    /// Send a chat conversation and print the reply
    Chat(ChatArgs),
    /// Generate images from a prompt
    Image(ImageArgs),
    /// Compute an embedding for a piece of text
    Embed(EmbedArgs),
}

/// Sampling knobs shared by `complete` and `chat`
#[derive(Args, Debug, Clone, Default)]
pub struct SamplingArgs {
    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Nucleus sampling mass
    #[arg(long)]
    pub top_p: Option<f64>,

    /// Maximum number of tokens to generate
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Frequency penalty (-2.0 to 2.0)
    #[arg(long, allow_hyphen_values = true)]
    pub frequency_penalty: Option<f64>,

    /// Presence penalty (-2.0 to 2.0)
    #[arg(long, allow_hyphen_values = true)]
    pub presence_penalty: Option<f64>,

    /// Stop sequence (repeatable, up to 4)
    #[arg(long = "stop")]
    pub stop: Vec<String>,

    /// End-user identifier
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CompleteArgs {
    /// Prompt to complete
    pub prompt: String,

    /// Model ID (defaults to the configured completion model)
    #[arg(short, long)]
    pub model: Option<String>,

    #[command(flatten)]
    pub sampling: SamplingArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ChatArgs {
    /// User messages, sent in order
    #[arg(required = true)]
    pub messages: Vec<String>,

    /// System message placed before the user messages
    #[arg(short, long)]
    pub system: Option<String>,

    /// Model ID (defaults to the configured chat model)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Number of choices to generate
    #[arg(short = 'n', long = "count")]
    pub n: Option<u32>,

    /// Logit bias entry as TOKEN_ID=BIAS (repeatable)
    #[arg(long = "logit-bias", allow_hyphen_values = true)]
    pub logit_bias: Vec<String>,

    #[command(flatten)]
    pub sampling: SamplingArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ImageArgs {
    /// Description of the image, at most 1000 characters
    pub prompt: String,

    /// Number of images (1 to 10)
    #[arg(short = 'n', long = "count")]
    pub n: Option<u32>,

    /// Image size: 256x256, 512x512 or 1024x1024
    #[arg(short, long)]
    pub size: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct EmbedArgs {
    /// Text to embed
    pub input: String,

    /// Model ID (defaults to the configured embedding model)
    #[arg(short, long)]
    pub model: Option<String>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
