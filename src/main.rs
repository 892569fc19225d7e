//! TransX Supervised Transcoder
//!
//! A command-line tool that runs ffmpeg transcodes under supervision: live
//! fractional progress parsed from the encoder's status stream, an inactivity
//! watchdog for hung processes, and post-run artifact validation.
//!
//! # Usage
//!
//! ```bash
//! transx transcode --input video.mov --output video.mp4 --out-opt -c:v --out-opt libx264
//! transx transcode --input video.mov --output video.mp4 --timeout 120 --no-validate
//! transx inspect --input video.mp4 --json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use transx_cli::cli::{commands, Cli, Commands};
use transx_cli::config::TranscodeConfig;

/// Main entry point for the TransX CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG takes precedence over --log-level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting TransX");

    // Initialize configuration hierarchy: Env > File > Defaults.
    let config = TranscodeConfig::initialize(cli.config.as_deref())?;

    // Execute the requested command; CLI flags are applied on top.
    match cli.command {
        Commands::Transcode(args) => {
            commands::transcode(args, config).await?;
        }
        Commands::Inspect(args) => {
            commands::inspect(args, config).await?;
        }
    }

    info!("TransX completed successfully");
    Ok(())
}
