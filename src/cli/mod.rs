//! CLI module for TransX
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// TransX Supervised Transcoder
///
/// A command-line tool that runs ffmpeg transcodes under supervision: live
/// fractional progress, an inactivity watchdog, and outcome validation.
#[derive(Parser)]
#[command(name = "transx")]
#[command(about = "TransX - Supervised FFmpeg transcoding with progress and validation")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Configuration file path (TOML)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run a supervised transcode
    Transcode(args::TranscodeArgs),
    /// Inspect media file information
    Inspect(args::InspectArgs),
}
