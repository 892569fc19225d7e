//! Command implementations

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::cli::args::{InspectArgs, TranscodeArgs};
use crate::config::{AspectMode, TranscodeConfig};
use crate::engine::progress::{
    ConsoleProgressSink, JsonProgressSink, NoOpProgressSink, ProgressSink,
};
use crate::engine::{Invocation, Outcome, Transcoder};
use crate::probe::{FfprobeInspector, MediaInfo};

/// Execute the transcode command
pub async fn transcode(args: TranscodeArgs, mut config: TranscodeConfig) -> Result<()> {
    info!("Starting transcode operation");
    info!("Input: {}", args.input);

    apply_cli_overrides(&args, &mut config)?;

    let mut invocation = Invocation::new(&args.input)
        .with_input_options(args.input_options)
        .with_output_options(args.output_options)
        .with_strictness(config.strict);
    if let Some(output) = &args.output {
        invocation = invocation.with_destination(output);
    }

    let probe = FfprobeInspector::new(&config.ffprobe_binary)
        .context("Failed to initialize media prober")?;

    let sink: Box<dyn ProgressSink> = if args.json_progress {
        Box::new(JsonProgressSink)
    } else if args.quiet {
        Box::new(NoOpProgressSink)
    } else {
        Box::new(ConsoleProgressSink)
    };

    let transcoder = Transcoder::new(config);
    let outcome = transcoder
        .run(invocation, &probe, sink.as_ref())
        .await
        .context("Transcode run failed")?;

    report_outcome(outcome)
}

/// Apply CLI flags on top of the assembled configuration.
///
/// Only flags the user actually supplied override the file/env values;
/// omitted flags leave the lower-precedence setting intact.
fn apply_cli_overrides(args: &TranscodeArgs, config: &mut TranscodeConfig) -> Result<()> {
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if args.no_validate {
        config.validate = false;
    }
    if args.no_strict {
        config.strict = false;
    }
    if let Some(aspect) = &args.aspect {
        config.aspect_mode = AspectMode::parse(aspect)?;
    }
    if let Some(raw) = &args.raw {
        config.override_command = Some(raw.clone());
    }
    Ok(())
}

/// Log the terminal outcome and map failures onto the fatal error channel
fn report_outcome(outcome: Outcome) -> Result<()> {
    match &outcome {
        Outcome::Succeeded(artifact) => {
            match &artifact.path {
                Some(path) => info!("Transcode succeeded: {}", path),
                None => info!("Transcode succeeded"),
            }
            Ok(())
        }
        Outcome::ValidationFailed { notes, diagnostic } => {
            for note in notes {
                error!("Validation note: {}", note);
            }
            fail(outcome.label(), diagnostic)
        }
        Outcome::Hung(diagnostic)
        | Outcome::Crashed(diagnostic)
        | Outcome::NoOutput(diagnostic) => fail(outcome.label(), diagnostic),
    }
}

fn fail(label: &str, diagnostic: &crate::engine::Diagnostic) -> Result<()> {
    error!("Transcode {}: {}", label, diagnostic.message);
    error!("Command: {}", diagnostic.command);
    error!("Process output:\n{}", diagnostic.output);
    Err(anyhow::anyhow!(
        "transcode {}: {}",
        label,
        diagnostic.message
    ))
}

/// Execute the inspect command
pub async fn inspect(args: InspectArgs, config: TranscodeConfig) -> Result<()> {
    info!("Starting inspect operation");
    info!("Input: {}", args.input);

    let probe = FfprobeInspector::new(&config.ffprobe_binary)
        .context("Failed to initialize media prober")?;

    let info = crate::probe::MediaProbe::inspect(&probe, &args.input)
        .await
        .context("Failed to inspect media file")?
        .ok_or_else(|| anyhow::anyhow!("Input file does not exist: {}", args.input))?;

    if args.json {
        let json = serde_json::to_string_pretty(&info)
            .context("Failed to serialize media info to JSON")?;
        println!("{}", json);
    } else {
        display_media_info(&args.input, &info);
    }

    Ok(())
}

/// Display media information in human-readable format
fn display_media_info(path: &str, info: &MediaInfo) {
    println!("Media Information");
    println!("=================");
    println!("File: {}", path);
    println!("Valid: {}", if info.valid { "yes" } else { "no" });
    println!("Duration: {:.3}s", info.duration);
    if let (Some(width), Some(height)) = (info.width, info.height) {
        println!("Resolution: {}x{}", width, height);
    }
    if let Some(ratio) = info.aspect_ratio {
        println!("Aspect Ratio: {:.4}", ratio);
    }
}
