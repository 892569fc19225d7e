//! Media metadata inspection
//!
//! The transcode engine treats metadata extraction as an external collaborator
//! behind the [`MediaProbe`] trait; [`inspector::FfprobeInspector`] is the
//! ffprobe-backed implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TransxResult;

pub mod inspector;

pub use inspector::FfprobeInspector;

/// Metadata for an existing media file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Whether the file decodes as valid media
    pub valid: bool,
    /// Duration in seconds
    pub duration: f64,
    /// Display aspect ratio (width / height), if known
    pub aspect_ratio: Option<f64>,
    /// Video width in pixels, if a video stream exists
    pub width: Option<u32>,
    /// Video height in pixels, if a video stream exists
    pub height: Option<u32>,
}

/// Port for media file probing
///
/// `inspect` returns `Ok(None)` when the file does not exist. Underlying
/// faults (prober missing, undecodable output) propagate as errors; they are
/// distinct from an invalid-but-present artifact, which is reported through
/// `MediaInfo::valid`.
#[async_trait]
pub trait MediaProbe: Send + Sync {
    /// Probe a file, returning its metadata or `None` if it is absent
    async fn inspect(&self, file_path: &str) -> TransxResult<Option<MediaInfo>>;
}
