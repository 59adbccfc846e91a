//! Output formatting utilities for chatctl

use crate::cli::OutputFormat;
use crate::errors::CliError;
use chatwire_core::types::{ApiError, ChatResult, CompletionsResult, EmbeddingsResult, ImagesResult};
use chrono::{DateTime, Utc};
use colored::*;
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ImageTableRow {
    #[tabled(rename = "#")]
    index: usize,
    url: String,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn format_created(created: u64) -> String {
    i64::try_from(created)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| created.to_string())
}

/// Render a completions result
pub fn render_completion(result: &CompletionsResult, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => to_json(result),
        OutputFormat::Text => {
            let mut out = String::new();
            for choice in &result.choices {
                if result.choices.len() > 1 {
                    out.push_str(&format!("{}\n", format!("[{}]", choice.index).bold()));
                }
                out.push_str(choice.text.trim());
                out.push('\n');
            }
            out.push_str(&format!(
                "{}\n",
                format!("{} · {}", result.model, format_created(result.created)).dimmed()
            ));
            Ok(out)
        }
    }
}

/// Render a chat result
pub fn render_chat(result: &ChatResult, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => to_json(result),
        OutputFormat::Text => {
            let mut out = String::new();
            for choice in &result.choices {
                let header = match &choice.finish_reason {
                    Some(reason) => format!("{} ({})", choice.message.role, reason),
                    None => choice.message.role.to_string(),
                };
                out.push_str(&format!("{}\n", header.bold().blue()));
                out.push_str(&choice.message.content);
                out.push('\n');
            }
            if let Some(usage) = result.usage {
                out.push_str(&format!(
                    "{}\n",
                    format!(
                        "{} · tokens: {} prompt + {} completion = {}",
                        result.model, usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
                    )
                    .dimmed()
                ));
            }
            Ok(out)
        }
    }
}

/// Render an images result
pub fn render_images(result: &ImagesResult, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => to_json(result),
        OutputFormat::Text => {
            if result.data.is_empty() {
                return Ok("No images returned\n".to_string());
            }

            let rows: Vec<ImageTableRow> = result
                .urls()
                .enumerate()
                .map(|(index, url)| ImageTableRow {
                    index,
                    url: url.to_string(),
                })
                .collect();
            Ok(format!("{}\n", Table::new(rows)))
        }
    }
}

/// Render an embeddings result
pub fn render_embeddings(result: &EmbeddingsResult, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => to_json(result),
        OutputFormat::Text => {
            let mut out = String::new();
            for item in &result.data {
                let preview: Vec<String> = item
                    .embedding
                    .iter()
                    .take(4)
                    .map(|value| format!("{:.6}", value))
                    .collect();
                let ellipsis = if item.embedding.len() > 4 { ", ..." } else { "" };
                out.push_str(&format!(
                    "{} {} dimensions [{}{}]\n",
                    format!("[{}]", item.index).bold(),
                    item.embedding.len(),
                    preview.join(", "),
                    ellipsis
                ));
            }
            Ok(out)
        }
    }
}

/// Render an error reported by the API
pub fn render_api_error(error: &ApiError) -> String {
    let mut out = format!("{} {}\n", "✗".red().bold(), error.message.red());
    out.push_str(&format!("{:<8} {}\n", "Type:".bold(), error.r#type));
    if let Some(param) = &error.param {
        out.push_str(&format!("{:<8} {}\n", "Param:".bold(), param));
    }
    if let Some(code) = &error.code {
        out.push_str(&format!("{:<8} {}\n", "Code:".bold(), code));
    }
    out
}
