//! Startup and the story loop.
//!
//! Resolves configuration in order: CLI flags, then the optional config
//! file, then built-in defaults. Everything the story needs is loaded before
//! the first prompt so startup failures never interrupt a scene.

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::info;

use daydream_core::story::{StoryDriver, StorySession, TokioPacer, Typewriter};
use daydream_infra::config::{default_config_path, load_config};
use daydream_infra::filesystem::load_system_instructions;
use daydream_infra::llm::gemini::GeminiProvider;
use daydream_infra::secret::resolve_api_key;
use daydream_types::config::{DEFAULT_MODEL, DaydreamConfig};

use crate::cli::Cli;

/// Load the config named on the command line, or the default one if any.
async fn resolve_config(cli: &Cli) -> DaydreamConfig {
    match cli.config.clone().or_else(default_config_path) {
        Some(path) => load_config(&path).await,
        None => DaydreamConfig::default(),
    }
}

/// Run the story until input ends, the stream fails or `cancel` fires.
///
/// Only returns with an error; a story has no natural ending.
pub async fn run_story(cli: Cli, cancel: CancellationToken) -> anyhow::Result<()> {
    let config = resolve_config(&cli).await;

    let api_key = resolve_api_key(cli.api_key.clone())?;
    let instructions = load_system_instructions(&cli.system_instructions).await?;

    let model = cli
        .model
        .clone()
        .or_else(|| config.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let mut provider =
        GeminiProvider::new(api_key, model.clone()).context("failed to create Gemini provider")?;
    if let Some(base_url) = &config.base_url {
        provider = provider.with_base_url(base_url.clone());
    }

    info!(
        model = %model,
        instructions = %cli.system_instructions.display(),
        "starting story"
    );

    let session = StorySession::new(instructions, model);
    let typewriter = Typewriter::new(std::io::stdout(), TokioPacer, config.timing.policy());
    let input = tokio::io::BufReader::new(tokio::io::stdin());

    let mut driver = StoryDriver::new(provider, session, input, typewriter, cancel);
    driver.run().await?;
    Ok(())
}
