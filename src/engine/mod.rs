//! Supervised transcode engine
//!
//! The engine builds an ffmpeg invocation, spawns it, streams fractional
//! progress from its stderr, and classifies the terminal result. Expected
//! failure states (hung, crashed, invalid output) are values of [`Outcome`],
//! not errors; see [`crate::error::TransxError`] for the fault channel.

use serde::{Deserialize, Serialize};

use crate::probe::MediaInfo;

pub mod classifier;
pub mod command;
pub mod parser;
pub mod progress;
pub mod scale;
pub mod supervisor;
pub mod transcoder;

pub use command::{BuiltCommand, CommandBuilder};
pub use progress::{ChannelProgressSink, ConsoleProgressSink, JsonProgressSink, NoOpProgressSink, ProgressSink};
pub use supervisor::Supervisor;
pub use transcoder::Transcoder;

/// Complete, immutable description of one transcode attempt
///
/// Option fragments are opaque argv slices; the engine does not interpret
/// them beyond the aspect-ratio resolution rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    /// Source media path
    pub source: String,
    /// Options placed before `-i` (decoder/demuxer side)
    pub input_options: Vec<String>,
    /// Options placed after `-i` (encoder/muxer side)
    pub output_options: Vec<String>,
    /// Destination path for the encoded artifact
    pub destination: Option<String>,
    /// Pass the error-strictness flag block to the encoder
    pub strict: bool,
    /// Literal command override; bypasses all other fields verbatim
    pub override_command: Option<String>,
}

impl Invocation {
    /// Create an invocation for the given source path
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            input_options: Vec::new(),
            output_options: Vec::new(),
            destination: None,
            strict: true,
            override_command: None,
        }
    }

    /// Set the input-options fragment
    pub fn with_input_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Set the output-options fragment
    pub fn with_output_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Set the destination path
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Enable or disable the error-strictness flag block
    pub fn with_strictness(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Bypass the builder with a literal command line
    pub fn with_override_command(mut self, command: impl Into<String>) -> Self {
        self.override_command = Some(command.into());
        self
    }
}

/// Diagnostic context attached to every failed outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The exact command line that was executed
    pub command: String,
    /// Accumulated process output
    pub output: String,
    /// Human-readable failure summary
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\ncommand: {}\noutput:\n{}",
            self.message, self.command, self.output
        )
    }
}

/// Reference to a successfully produced artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactRef {
    /// Destination path, when one was given
    pub path: Option<String>,
    /// Cached metadata, present when validation ran
    pub info: Option<MediaInfo>,
}

/// Terminal classification of a completed run
///
/// Exactly one outcome is produced per invocation execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Outcome {
    /// Process exited successfully and the artifact passed validation (or
    /// validation was disabled)
    Succeeded(ArtifactRef),
    /// Process exited successfully but the artifact is invalid
    ValidationFailed {
        /// All accumulated error notes
        notes: Vec<String>,
        diagnostic: Diagnostic,
    },
    /// Inactivity timeout elapsed with no stream activity
    Hung(Diagnostic),
    /// Process exited with failure or printed the in-stream error marker
    Crashed(Diagnostic),
    /// Process exited successfully but produced no usable output
    NoOutput(Diagnostic),
}

impl Outcome {
    /// Whether the run succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }

    /// Short machine-readable label for logs and JSON output
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Succeeded(_) => "succeeded",
            Outcome::ValidationFailed { .. } => "validation_failed",
            Outcome::Hung(_) => "hung",
            Outcome::Crashed(_) => "crashed",
            Outcome::NoOutput(_) => "no_output",
        }
    }

    /// Diagnostic context for failed outcomes
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Outcome::Succeeded(_) => None,
            Outcome::ValidationFailed { diagnostic, .. } => Some(diagnostic),
            Outcome::Hung(diagnostic) => Some(diagnostic),
            Outcome::Crashed(diagnostic) => Some(diagnostic),
            Outcome::NoOutput(diagnostic) => Some(diagnostic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_builder_chains() {
        let invocation = Invocation::new("in.mov")
            .with_input_options(["-r", "30"])
            .with_output_options(["-c:v", "libx264"])
            .with_destination("out.mp4")
            .with_strictness(false);

        assert_eq!(invocation.source, "in.mov");
        assert_eq!(invocation.input_options, vec!["-r", "30"]);
        assert_eq!(invocation.destination.as_deref(), Some("out.mp4"));
        assert!(!invocation.strict);
        assert!(invocation.override_command.is_none());
    }

    #[test]
    fn outcome_labels() {
        let diag = Diagnostic {
            command: "ffmpeg".into(),
            output: String::new(),
            message: "boom".into(),
        };
        assert_eq!(Outcome::Hung(diag.clone()).label(), "hung");
        assert_eq!(Outcome::Crashed(diag.clone()).label(), "crashed");
        assert!(Outcome::Crashed(diag).diagnostic().is_some());
        assert!(Outcome::Succeeded(ArtifactRef { path: None, info: None }).is_success());
    }
}
