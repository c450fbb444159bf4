//! cycle-companion: terminal cycle journal. Config from env, a few CLI overrides.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use cycle_companion::adapters::ai::{GeminiConfig, GeminiProvider};
use cycle_companion::adapters::cli::{Repl, ReplSettings};
use cycle_companion::adapters::storage::FileKeyValueStore;
use cycle_companion::application::{
    ControllerOptions, CycleExtractor, ExtractionSettings, JournalController, JournalRepository,
};
use cycle_companion::config::{AppConfig, LogFormat, LoggingConfig};
use cycle_companion::domain::check_in::CheckInPolicy;

#[derive(Parser)]
#[command(name = "cycle-companion")]
#[command(about = "A conversational cycle journal in your terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory for journal data and reports (overrides CYCLE_COMPANION__STORAGE__DATA_DIR).
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log output format: text or json.
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Never post check-in messages this session.
    #[arg(long)]
    no_check_in: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    if cli.no_check_in {
        config.check_in.enabled = false;
    }
    config.validate().context("invalid configuration")?;

    init_tracing(&config.logging)?;
    tracing::info!(data_dir = %config.storage.data_dir.display(), model = %config.ai.model, "starting");

    let store = FileKeyValueStore::new(config.storage.data_dir.clone());
    let repository = JournalRepository::new(Arc::new(store));

    let provider = GeminiProvider::new(
        GeminiConfig::new()
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout()),
    )
    .context("failed to build Gemini client")?;
    let extractor = CycleExtractor::new(
        Arc::new(provider),
        ExtractionSettings {
            temperature: config.ai.temperature,
            max_output_tokens: config.ai.max_output_tokens,
        },
    );

    let options = ControllerOptions {
        check_in: CheckInPolicy::new(config.check_in.hour)?,
        fallback_credential: config.ai.fallback_credential(),
        history_limit: config.storage.max_conversation_messages,
    };
    let controller = JournalController::load(repository, extractor, options)
        .await
        .context("failed to load journal")?;

    let settings = ReplSettings {
        check_in_enabled: config.check_in.enabled,
        poll_interval: config.check_in.poll_interval(),
        report_dir: config.storage.data_dir.clone(),
    };
    let mut repl = Repl::new(controller, settings, std::io::stdout());
    repl.run(tokio::io::BufReader::new(tokio::io::stdin())).await
}

/// Installs the global subscriber on stderr so logs never interleave with the chat.
/// `RUST_LOG` wins over the configured filter.
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .context("invalid log filter")?;

    let fmt_layer = match logging.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}
