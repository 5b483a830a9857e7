//! Clipix command-line entry point
//!
//! # Usage
//!
//! ```bash
//! clipix probe --input talk.mp4
//! clipix cut --input talk.mp4 --segment 0:10-0:25 --segment 1:02-1:40 --output highlights.mp4
//! clipix transcribe --input talk.mp4 --language en
//! clipix render --transcript uploads/talk.json --format vtt --output talk.vtt
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use clipix::app::DefaultAppContainer;
use clipix::cli::{commands, Cli, Commands};
use clipix::config_initialization::initialize_configuration;
use clipix::utils::logging::init_logging;

/// Main entry point for the Clipix CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let overrides = cli.config_overrides()?;
    let config = initialize_configuration(&overrides, |key| std::env::var(key).ok())
        .context("Failed to load configuration")?;
    init_logging(config.logging.level, config.logging.format);
    debug!(
        upload_dir = %config.storage.upload_dir.display(),
        ffmpeg = %config.tools.ffmpeg.display(),
        ffprobe = %config.tools.ffprobe.display(),
        "configuration loaded"
    );

    let command = match cli.command {
        Commands::Render(args) => return commands::render(args, cli.json),
        other => other,
    };

    let container =
        DefaultAppContainer::new(&config).context("Failed to initialize application")?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling");
            on_interrupt.cancel();
        }
    });

    commands::execute(command, &container, cli.json, &cancel).await?;
    info!("done");
    Ok(())
}
