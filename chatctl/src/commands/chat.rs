//! `chat` command implementation

use crate::cli::ChatArgs;
use crate::config::ChatctlConfig;
use crate::errors::CliError;
use crate::output;
use chatwire_core::prelude::*;
use tracing::{debug, info};

/// Handle the chat command
pub async fn handle_chat_command<T: Transport>(
    client: &OpenAiClient<T>,
    args: ChatArgs,
    config: &ChatctlConfig,
) -> Result<String, CliError> {
    let query = build_chat_query(args, config)?;
    info!(
        "Sending {} message(s) to model {}",
        query.messages.len(),
        query.model
    );

    let result = client.chats(&query).await?;
    output::render_chat(&result, config.default_format)
}

fn build_chat_query(args: ChatArgs, config: &ChatctlConfig) -> Result<ChatQuery, CliError> {
    let model = args.model.unwrap_or_else(|| config.chat_model.clone());

    let system = args.system.map(ChatMessage::system);
    let users = args.messages.into_iter().map(ChatMessage::user);
    let mut query = ChatQuery::new(model, system.into_iter().chain(users));

    for entry in &args.logit_bias {
        let (token, bias) = parse_logit_bias(entry)?;
        query = query.with_logit_bias(token, bias);
    }

    let sampling = args.sampling;
    query.n = args.n;
    query.temperature = sampling.temperature;
    query.top_p = sampling.top_p;
    query.max_tokens = sampling.max_tokens;
    query.frequency_penalty = sampling.frequency_penalty;
    query.presence_penalty = sampling.presence_penalty;
    query.stop = (!sampling.stop.is_empty()).then_some(sampling.stop);
    query.user = sampling.user;

    debug!("Built chat query: {:?}", query);
    Ok(query)
}

/// Parse a `TOKEN_ID=BIAS` pair
fn parse_logit_bias(entry: &str) -> Result<(String, i32), CliError> {
    let (token, bias) = entry.split_once('=').ok_or_else(|| {
        CliError::InvalidArgument(format!("Logit bias '{}' must look like TOKEN_ID=BIAS", entry))
    })?;

    let token = token.trim();
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return Err(CliError::InvalidArgument(format!(
            "Logit bias token '{}' must be a numeric token id",
            token
        )));
    }

    let bias = bias.trim().parse::<i32>().map_err(|e| {
        CliError::InvalidArgument(format!("Logit bias value '{}' is not an integer: {}", bias, e))
    })?;

    Ok((token.to_string(), bias))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SamplingArgs;
    use chatwire_adapter_in_memory::InMemoryTransport;
    use serde_json::json;

    fn args(messages: &[&str]) -> ChatArgs {
        ChatArgs {
            messages: messages.iter().map(|m| m.to_string()).collect(),
            system: None,
            model: None,
            n: None,
            logit_bias: Vec::new(),
            sampling: SamplingArgs::default(),
        }
    }

    #[test]
    fn test_parse_logit_bias() {
        assert_eq!(parse_logit_bias("50256=-100").unwrap(), ("50256".to_string(), -100));
        assert_eq!(parse_logit_bias(" 42 = 5 ").unwrap(), ("42".to_string(), 5));
        assert!(parse_logit_bias("50256").is_err());
        assert!(parse_logit_bias("abc=1").is_err());
        assert!(parse_logit_bias("1=high").is_err());
    }

    #[test]
    fn test_minimal_chat_query() {
        let query = build_chat_query(args(&["hi"]), &ChatctlConfig::default()).unwrap();
        assert_eq!(
            serde_json::to_string(&query).unwrap(),
            r#"{"model":"gpt-3.5-turbo","messages":[{"role":"user","content":"hi"}]}"#
        );
    }

    #[test]
    fn test_chat_query_with_system_and_bias() {
        let mut chat_args = args(&["first", "second"]);
        chat_args.system = Some("be terse".to_string());
        chat_args.model = Some("gpt-4".to_string());
        chat_args.n = Some(2);
        chat_args.logit_bias = vec!["50256=-100".to_string()];
        chat_args.sampling.stop = vec!["END".to_string()];

        let query = build_chat_query(chat_args, &ChatctlConfig::default()).unwrap();
        assert_eq!(query.model, "gpt-4");
        assert_eq!(
            query.messages,
            vec![
                ChatMessage::system("be terse"),
                ChatMessage::user("first"),
                ChatMessage::user("second"),
            ]
        );
        assert_eq!(query.n, Some(2));
        assert_eq!(query.stop, Some(vec!["END".to_string()]));
        assert_eq!(query.logit_bias.unwrap().get("50256"), Some(&-100));
    }

    #[tokio::test]
    async fn test_chat_api_error_is_surfaced() {
        let transport = InMemoryTransport::new();
        transport
            .respond_json(
                404,
                &json!({"error": {
                    "message": "The model `gpt-5` does not exist",
                    "type": "invalid_request_error",
                    "param": null,
                    "code": "model_not_found"
                }}),
            )
            .await
            .unwrap();
        let client = OpenAiClient::new("sk-test", transport);

        let mut chat_args = args(&["hi"]);
        chat_args.model = Some("gpt-5".to_string());
        let err = handle_chat_command(&client, chat_args, &ChatctlConfig::default())
            .await
            .unwrap_err();

        match err {
            CliError::Client(ClientError::Api(api)) => {
                assert_eq!(api.code.as_deref(), Some("model_not_found"))
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }
}
