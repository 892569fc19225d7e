//! FFprobe adapter for media file probing

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::error::{TransxError, TransxResult};
use crate::probe::{MediaInfo, MediaProbe};

/// FFprobe-based probe adapter
pub struct FfprobeInspector {
    binary: String,
}

/// FFprobe JSON output format
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    format: Option<FfprobeFormat>,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

impl FfprobeInspector {
    /// Create a new inspector using the given prober binary name
    pub fn new(binary: impl Into<String>) -> TransxResult<Self> {
        let binary = binary.into();
        which::which(&binary).map_err(|_| TransxError::BinaryNotFound {
            name: binary.clone(),
        })?;
        Ok(Self { binary })
    }
}

#[async_trait]
impl MediaProbe for FfprobeInspector {
    async fn inspect(&self, file_path: &str) -> TransxResult<Option<MediaInfo>> {
        if !Path::new(file_path).exists() {
            return Ok(None);
        }

        debug!("Probing media file: {}", file_path);

        let output = Command::new(&self.binary)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(file_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            // ffprobe rejects files it cannot decode; that is an invalid
            // artifact, not a prober fault.
            debug!(
                "ffprobe rejected {}: {}",
                file_path,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(Some(MediaInfo {
                valid: false,
                duration: 0.0,
                aspect_ratio: None,
                width: None,
                height: None,
            }));
        }

        let probe = decode_probe_output(file_path, &output.stdout)?;
        Ok(Some(decode_media_info(probe)))
    }
}

fn decode_probe_output(path: &str, bytes: &[u8]) -> TransxResult<FfprobeOutput> {
    serde_json::from_slice(bytes).map_err(|e| TransxError::ProbeError {
        path: path.to_string(),
        message: format!("undecodable prober output: {}", e),
    })
}

fn decode_media_info(probe: FfprobeOutput) -> MediaInfo {
    let duration = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    let video_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"));

    let width = video_stream.and_then(|s| s.width);
    let height = video_stream.and_then(|s| s.height);
    let aspect_ratio = match (width, height) {
        (Some(w), Some(h)) if h > 0 => Some(w as f64 / h as f64),
        _ => None,
    };

    MediaInfo {
        valid: !probe.streams.is_empty() && duration > 0.0,
        duration,
        aspect_ratio,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> MediaInfo {
        let probe: FfprobeOutput = serde_json::from_str(json).unwrap();
        decode_media_info(probe)
    }

    #[test]
    fn decodes_valid_video() {
        let info = decode(
            r#"{
                "format": {"duration": "12.5"},
                "streams": [
                    {"codec_type": "video", "width": 1920, "height": 1080},
                    {"codec_type": "audio"}
                ]
            }"#,
        );

        assert!(info.valid);
        assert_eq!(info.duration, 12.5);
        assert_eq!(info.width, Some(1920));
        assert_eq!(info.height, Some(1080));
        let ratio = info.aspect_ratio.unwrap();
        assert!((ratio - 16.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn no_streams_is_invalid() {
        let info = decode(r#"{"format": {"duration": "3.0"}, "streams": []}"#);
        assert!(!info.valid);
    }

    #[test]
    fn missing_duration_is_invalid() {
        let info = decode(r#"{"format": {}, "streams": [{"codec_type": "video"}]}"#);
        assert!(!info.valid);
        assert_eq!(info.duration, 0.0);
        assert!(info.aspect_ratio.is_none());
    }

    #[test]
    fn garbage_prober_output_is_a_probe_fault() {
        let err = decode_probe_output("out.mp4", b"not json").unwrap_err();
        match err {
            TransxError::ProbeError { path, message } => {
                assert_eq!(path, "out.mp4");
                assert!(message.contains("undecodable"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
