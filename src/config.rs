//! Run configuration and initialization hierarchy
//!
//! Configuration is an explicit value assembled once at startup and passed
//! into each run; there is no ambient mutable global. Precedence follows
//! CLI > Env > File > Defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{TransxError, TransxResult};

/// Default inactivity timeout between stderr reads, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Aspect-ratio preservation mode for the pre-flight dimension adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AspectMode {
    /// No adjustment
    #[default]
    None,
    /// Keep the requested width, derive the height from the aspect ratio
    PreserveWidth,
    /// Keep the requested height, derive the width from the aspect ratio
    PreserveHeight,
}

impl AspectMode {
    /// Parse an aspect mode from its CLI/config spelling
    pub fn parse(mode_str: &str) -> TransxResult<Self> {
        match mode_str.to_lowercase().as_str() {
            "none" => Ok(AspectMode::None),
            "width" | "preserve_width" => Ok(AspectMode::PreserveWidth),
            "height" | "preserve_height" => Ok(AspectMode::PreserveHeight),
            _ => Err(TransxError::ConfigError {
                message: format!(
                    "Invalid aspect mode: {}. Valid modes: none, width, height",
                    mode_str
                ),
            }),
        }
    }
}

/// Configuration for supervised transcode runs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscodeConfig {
    /// Inactivity timeout in seconds; 0 disables the watchdog.
    ///
    /// The boundary is inclusive: a read gap equal to the timeout counts as
    /// a hang.
    pub timeout_secs: u64,
    /// Validate the output artifact after a successful exit
    pub validate: bool,
    /// Pass the error-strictness flag block to the encoder
    pub strict: bool,
    /// Literal command override; bypasses the command builder entirely
    pub override_command: Option<String>,
    /// Aspect-ratio preservation mode
    pub aspect_mode: AspectMode,
    /// Encoder binary name
    pub ffmpeg_binary: String,
    /// Prober binary name
    pub ffprobe_binary: String,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            validate: true,
            strict: true,
            override_command: None,
            aspect_mode: AspectMode::None,
            ffmpeg_binary: "ffmpeg".to_string(),
            ffprobe_binary: "ffprobe".to_string(),
        }
    }
}

impl TranscodeConfig {
    /// Inactivity timeout as a `Duration`, or `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }

    /// Load configuration from a TOML file
    pub fn load_file(path: impl AsRef<Path>) -> TransxResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents).map_err(|e| TransxError::ConfigError {
            message: format!("Failed to parse {}: {}", path.display(), e),
        })?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Apply `TRANSX_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) -> TransxResult<()> {
        let mut env_overrides = 0;

        if let Ok(value) = std::env::var("TRANSX_TIMEOUT_SECS") {
            self.timeout_secs = value.parse().map_err(|_| TransxError::ConfigError {
                message: format!("Invalid TRANSX_TIMEOUT_SECS: {}", value),
            })?;
            env_overrides += 1;
        }
        if let Ok(value) = std::env::var("TRANSX_VALIDATE") {
            self.validate = parse_bool(&value, "TRANSX_VALIDATE")?;
            env_overrides += 1;
        }
        if let Ok(value) = std::env::var("TRANSX_STRICT") {
            self.strict = parse_bool(&value, "TRANSX_STRICT")?;
            env_overrides += 1;
        }
        if let Ok(value) = std::env::var("TRANSX_FFMPEG") {
            self.ffmpeg_binary = value;
            env_overrides += 1;
        }
        if let Ok(value) = std::env::var("TRANSX_FFPROBE") {
            self.ffprobe_binary = value;
            env_overrides += 1;
        }

        if env_overrides > 0 {
            debug!("Applied {} environment variable overrides", env_overrides);
        }

        Ok(())
    }

    /// Initialize configuration following precedence: Env > File > Defaults.
    ///
    /// CLI overrides are applied afterwards by the command layer.
    pub fn initialize(config_file: Option<&str>) -> TransxResult<Self> {
        let mut config = match config_file {
            Some(path) => Self::load_file(path)?,
            None => {
                let default_path = Path::new("transx.toml");
                if default_path.exists() {
                    Self::load_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides()?;
        Ok(config)
    }
}

fn parse_bool(value: &str, name: &str) -> TransxResult<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(TransxError::ConfigError {
            message: format!("Invalid boolean for {}: {}", name, value),
        }),
    }
}
