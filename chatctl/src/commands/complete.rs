//! `complete` command implementation

use crate::cli::{CompleteArgs, SamplingArgs};
use crate::config::ChatctlConfig;
use crate::errors::CliError;
use crate::output;
use chatwire_core::prelude::*;
use tracing::info;

/// Handle the complete command
pub async fn handle_complete_command<T: Transport>(
    client: &OpenAiClient<T>,
    args: CompleteArgs,
    config: &ChatctlConfig,
) -> Result<String, CliError> {
    let query = build_completions_query(args, config);
    info!("Requesting completion from model {}", query.model);

    let result = client.completions(&query).await?;
    output::render_completion(&result, config.default_format)
}

fn build_completions_query(args: CompleteArgs, config: &ChatctlConfig) -> CompletionsQuery {
    let model = args.model.unwrap_or_else(|| config.completion_model.clone());
    let SamplingArgs {
        temperature,
        top_p,
        max_tokens,
        frequency_penalty,
        presence_penalty,
        stop,
        user,
    } = args.sampling;

    let mut query = CompletionsQuery::new(model, args.prompt);
    query.temperature = temperature;
    query.top_p = top_p;
    query.max_tokens = max_tokens;
    query.frequency_penalty = frequency_penalty;
    query.presence_penalty = presence_penalty;
    query.stop = (!stop.is_empty()).then_some(stop);
    query.user = user;
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatwire_adapter_in_memory::InMemoryTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_complete_uses_configured_model() {
        let transport = InMemoryTransport::new();
        transport
            .respond_json(
                200,
                &json!({
                    "id": "cmpl-1",
                    "object": "text_completion",
                    "created": 1589478378,
                    "model": "text-davinci-003",
                    "choices": [{"text": "\n\nThis is indeed a test", "index": 0, "logprobs": null, "finish_reason": "length"}]
                }),
            )
            .await
            .unwrap();
        let client = OpenAiClient::new("sk-test", transport.clone());

        let args = CompleteArgs {
            prompt: "Say this is a test".to_string(),
            model: None,
            sampling: SamplingArgs {
                max_tokens: Some(7),
                ..Default::default()
            },
        };
        let config = ChatctlConfig {
            default_format: crate::cli::OutputFormat::Json,
            ..Default::default()
        };

        let out = handle_complete_command(&client, args, &config).await.unwrap();
        assert!(out.contains("This is indeed a test"));

        let request = transport.last_request().await.unwrap();
        assert_eq!(request.url, "https://api.openai.com/v1/completions");
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(
            body,
            json!({"model": "text-davinci-003", "prompt": "Say this is a test", "max_tokens": 7})
        );
    }
}
