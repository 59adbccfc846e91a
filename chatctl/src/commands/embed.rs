//! `embed` command implementation

use crate::cli::EmbedArgs;
use crate::config::ChatctlConfig;
use crate::errors::CliError;
use crate::output;
use chatwire_core::prelude::*;
use tracing::info;

/// Handle the embed command
pub async fn handle_embed_command<T: Transport>(
    client: &OpenAiClient<T>,
    args: EmbedArgs,
    config: &ChatctlConfig,
) -> Result<String, CliError> {
    let model = args.model.unwrap_or_else(|| config.embedding_model.clone());
    let query = EmbeddingsQuery::new(model, args.input);
    info!("Requesting embedding from model {}", query.model);

    let result = client.embeddings(&query).await?;
    output::render_embeddings(&result, config.default_format)
}
