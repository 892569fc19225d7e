//! Incremental progress parsing for the encoder status stream
//!
//! ffmpeg reports progress on stderr as `\r`-terminated stats lines
//! (`frame= ... size= ... time=00:01:23.45 bitrate= ...`). The parser turns
//! each chunk into either a fractional progress value or an abort signal when
//! the in-stream error marker appears.

use crate::utils::time::parse_clock_time;

/// Substring that marks an abnormal condition before process exit
pub const ERROR_MARKER: &str = "Error while";

/// Field prefix for the elapsed-time value in a stats line
const TIME_PREFIX: &str = "time=";

/// Result of parsing one status chunk
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedChunk {
    /// Chunk contained the error marker; the run must abort
    Abort,
    /// Fractional progress against the total duration.
    ///
    /// 0.0 for chunks without a usable time field; may exceed 1.0 when the
    /// encoder overruns the estimated duration (passed through unclamped).
    Progress(f64),
}

/// Parser for the encoder status stream
#[derive(Debug, Clone)]
pub struct ProgressParser {
    total_duration: Option<f64>,
}

impl ProgressParser {
    /// Create a parser for a run with the given total duration in seconds.
    ///
    /// An unknown or non-positive duration disables the fraction computation;
    /// every time-bearing chunk then yields 0.0 rather than dividing by zero.
    pub fn new(total_duration: Option<f64>) -> Self {
        Self { total_duration }
    }

    /// Parse a raw byte chunk.
    ///
    /// Invalid UTF-8 is replaced lossily so scanning never fails on
    /// malformed bytes.
    pub fn parse_chunk(&self, chunk: &[u8]) -> ParsedChunk {
        let text = String::from_utf8_lossy(chunk);
        self.parse_text(&text)
    }

    /// Parse an already-decoded chunk.
    ///
    /// Categories are checked in order: error marker, then time field, then
    /// fall-through to zero progress. Malformed time fields fail soft.
    pub fn parse_text(&self, text: &str) -> ParsedChunk {
        if text.contains(ERROR_MARKER) {
            return ParsedChunk::Abort;
        }

        ParsedChunk::Progress(self.fraction_of(text))
    }

    fn fraction_of(&self, text: &str) -> f64 {
        let Some(elapsed) = extract_elapsed_seconds(text) else {
            return 0.0;
        };

        match self.total_duration {
            Some(duration) if duration > 0.0 => elapsed / duration,
            _ => 0.0,
        }
    }
}

/// Extract the elapsed seconds from a `time=HH:MM:SS.ff` field, if present
fn extract_elapsed_seconds(text: &str) -> Option<f64> {
    let idx = text.find(TIME_PREFIX)?;
    let value = &text[idx + TIME_PREFIX.len()..];
    let end = value
        .find(|c: char| c.is_whitespace())
        .unwrap_or(value.len());
    parse_clock_time(&value[..end])
}
