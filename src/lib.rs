//! TransX Supervised Transcoding Library
//!
//! Launches an external ffmpeg process, supervises it under an inactivity
//! watchdog, streams fractional progress parsed from its status output, and
//! classifies the terminal result.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod probe;
pub mod utils;

// Re-export commonly used types
pub use config::{AspectMode, TranscodeConfig};
pub use engine::{ArtifactRef, Diagnostic, Invocation, Outcome, Transcoder};
pub use error::{TransxError, TransxResult};
pub use probe::{FfprobeInspector, MediaInfo, MediaProbe};
