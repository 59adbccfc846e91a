//! Command-line interface for Chatwire

use clap::Parser;
use std::process;
use tracing::{error, info, Level};

mod cli;
mod commands;
mod config;
mod errors;
mod output;

use chatwire_core::ClientError;
use cli::*;
use config::ChatctlConfig;
use errors::CliError;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = match ChatctlConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Override config with CLI args
    let config = config.with_overrides(&args);

    info!("Using API base: {}", config.api_base);

    match run(args.command, &config).await {
        Ok(out) => print!("{}", out),
        Err(CliError::Client(ClientError::Api(api_error))) => {
            eprint!("{}", output::render_api_error(&api_error));
            process::exit(1);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            process::exit(1);
        }
    }
}

async fn run(command: Commands, config: &ChatctlConfig) -> Result<String, CliError> {
    let client = commands::build_client(config)?;

    match command {
        Commands::Complete(args) => {
            commands::complete::handle_complete_command(&client, args, config).await
        }
        Commands::Chat(args) => commands::chat::handle_chat_command(&client, args, config).await,
        Commands::Image(args) => commands::image::handle_image_command(&client, args, config).await,
        Commands::Embed(args) => commands::embed::handle_embed_command(&client, args, config).await,
    }
}
