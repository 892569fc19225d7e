//! Error handling module for TransX

use thiserror::Error;

/// Main error type for TransX operations
///
/// Expected terminal states of a transcode run (hung, crashed, invalid
/// artifact, missing artifact) are not errors; they are variants of
/// [`crate::engine::Outcome`]. This type covers faults from collaborators
/// that the run cannot classify: spawn failures, probe failures, decoding
/// problems, configuration mistakes.
#[derive(Error, Debug)]
pub enum TransxError {
    /// Required external binary not found on PATH
    #[error("Required binary not found on PATH: {name}")]
    BinaryNotFound { name: String },

    /// Process could not be spawned
    #[error("Failed to spawn process `{command}`: {source}")]
    SpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Metadata probe failed unexpectedly
    #[error("Failed to probe media file {path}: {message}")]
    ProbeError { path: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for TransX operations
pub type TransxResult<T> = std::result::Result<T, TransxError>;
