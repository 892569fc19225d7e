//! Post-exit outcome classification
//!
//! Entered only when the process exited successfully and the caller requested
//! validation. Walks a short state machine: artifact existence, then metadata
//! validity, then success. Expected failures return a tagged [`Outcome`];
//! probe faults propagate as errors.

use tracing::{info, warn};

use crate::engine::progress::ProgressSink;
use crate::engine::supervisor::RunState;
use crate::engine::{ArtifactRef, Outcome};
use crate::error::TransxResult;
use crate::probe::MediaProbe;

/// Classify a successfully exited run by examining its artifact
pub async fn classify(
    command: &str,
    destination: Option<&str>,
    probe: &dyn MediaProbe,
    state: &mut RunState,
    sink: &dyn ProgressSink,
) -> TransxResult<Outcome> {
    let Some(destination) = destination else {
        state.notes.push("no destination path was given".to_string());
        return Ok(Outcome::NoOutput(
            state.diagnostic(command, "command produced no usable output"),
        ));
    };

    // The metadata service is queried at most once per run; the result is
    // cached on the run state.
    let info = match &state.artifact {
        Some(cached) => cached.clone(),
        None => match probe.inspect(destination).await? {
            Some(info) => {
                state.artifact = Some(info.clone());
                info
            }
            None => {
                warn!("No output file created at {}", destination);
                state
                    .notes
                    .push(format!("no output file created at {}", destination));
                return Ok(Outcome::NoOutput(
                    state.diagnostic(command, "command produced no usable output"),
                ));
            }
        },
    };

    if !info.valid {
        warn!("Encoded artifact failed validation: {}", destination);
        state
            .notes
            .push(format!("encoded file {} is not valid media", destination));
        return Ok(Outcome::ValidationFailed {
            notes: state.notes.clone(),
            diagnostic: state.diagnostic(command, "encoded artifact failed validation"),
        });
    }

    info!("Transcode validated: {}", destination);
    sink.update(1.0);
    Ok(Outcome::Succeeded(ArtifactRef {
        path: Some(destination.to_string()),
        info: Some(info),
    }))
}
