//! `image` command implementation

use crate::cli::ImageArgs;
use crate::config::ChatctlConfig;
use crate::errors::CliError;
use crate::output;
use chatwire_core::prelude::*;
use tracing::info;

/// Handle the image command
pub async fn handle_image_command<T: Transport>(
    client: &OpenAiClient<T>,
    args: ImageArgs,
    config: &ChatctlConfig,
) -> Result<String, CliError> {
    let mut query = ImagesQuery::new(args.prompt);
    query.n = args.n;
    query.size = args
        .size
        .as_deref()
        .map(str::parse::<ImageSize>)
        .transpose()
        .map_err(CliError::InvalidArgument)?;

    info!("Requesting {} image(s)", query.n.unwrap_or(1));

    let result = client.images(&query).await?;
    output::render_images(&result, config.default_format)
}
