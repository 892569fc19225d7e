//! Process supervision for one transcode run
//!
//! The supervisor owns the child process for the lifetime of a run: it spawns
//! the built command with a piped status stream, feeds each chunk through the
//! progress parser, enforces the inactivity watchdog, and waits for exit.
//! All mutable bookkeeping lives in [`RunState`], which is created at run
//! start and dropped when the run returns.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::engine::classifier;
use crate::engine::command::BuiltCommand;
use crate::engine::parser::{ParsedChunk, ProgressParser};
use crate::engine::progress::ProgressSink;
use crate::engine::{ArtifactRef, Diagnostic, Outcome};
use crate::error::{TransxError, TransxResult};
use crate::probe::{MediaInfo, MediaProbe};

/// Mutable bookkeeping for one in-flight run
pub struct RunState {
    /// Accumulated raw status-stream text
    pub(crate) output: String,
    /// Last progress fraction pushed to the sink
    pub(crate) last_progress: f64,
    /// Accumulated human-readable error notes
    pub(crate) notes: Vec<String>,
    /// Memoized artifact metadata, populated at most once
    pub(crate) artifact: Option<MediaInfo>,
}

impl RunState {
    fn new() -> Self {
        Self {
            output: String::new(),
            last_progress: 0.0,
            notes: Vec::new(),
            artifact: None,
        }
    }

    pub(crate) fn diagnostic(&self, command: &str, message: impl Into<String>) -> Diagnostic {
        Diagnostic {
            command: command.to_string(),
            output: self.output.clone(),
            message: message.into(),
        }
    }
}

/// Supervisor for external transcode processes
#[derive(Debug, Clone)]
pub struct Supervisor {
    timeout: Option<Duration>,
    validate: bool,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Supervisor {
    /// Create a supervisor with no timeout and validation enabled
    pub fn new() -> Self {
        Self {
            timeout: None,
            validate: true,
        }
    }

    /// Set the inactivity timeout; `None` disables the watchdog.
    ///
    /// The watchdog races each status-stream read against the window, so the
    /// timer resets on any read activity rather than on total elapsed time.
    /// The boundary is inclusive: a gap equal to the window counts as a hang.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable post-exit artifact validation
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Run a built command to its terminal outcome.
    ///
    /// Pushes 0.0 to the sink unconditionally at start, one value per parsed
    /// chunk while the process runs, and 1.0 exactly once if and only if
    /// validation runs and succeeds. Returns `Err` only for faults outside
    /// the outcome taxonomy (spawn failure, probe fault, stream I/O).
    pub async fn run(
        &self,
        command: &BuiltCommand,
        total_duration: Option<f64>,
        destination: Option<&str>,
        probe: &dyn MediaProbe,
        sink: &dyn ProgressSink,
    ) -> TransxResult<Outcome> {
        let command_display = command.display();
        info!("Supervising transcode: {}", command_display);

        let mut child = spawn_piped(command)?;
        sink.update(0.0);

        let mut state = RunState::new();
        let parser = ProgressParser::new(total_duration);

        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| TransxError::SpawnError {
                command: command_display.clone(),
                source: std::io::Error::other("status stream was not captured"),
            })?;

        let mut buf = [0u8; 8192];
        let mut pending = String::new();

        loop {
            let read = match self.timeout {
                Some(window) => {
                    match tokio::time::timeout(window, stderr.read(&mut buf)).await {
                        Ok(result) => result?,
                        Err(_) => {
                            warn!("No status output for {:?}, killing process", window);
                            let _ = child.kill().await;
                            let _ = child.wait().await;
                            return Ok(Outcome::Hung(state.diagnostic(
                                &command_display,
                                format!("process produced no output for {:?}", window),
                            )));
                        }
                    }
                }
                None => stderr.read(&mut buf).await?,
            };

            if read == 0 {
                break;
            }

            let text = String::from_utf8_lossy(&buf[..read]);
            state.output.push_str(&text);
            pending.push_str(&text);

            // Stats lines are \r-terminated; headers and error text use \n.
            while let Some(pos) = pending.find(['\r', '\n']) {
                let chunk: String = pending.drain(..=pos).collect();
                let chunk = chunk.trim_end_matches(['\r', '\n']);
                if chunk.is_empty() {
                    continue;
                }
                if let Some(outcome) = self
                    .consume_chunk(&parser, chunk, &mut state, &mut child, &command_display, sink)
                    .await
                {
                    return Ok(outcome);
                }
            }
        }

        // Trailing partial chunk after stream close.
        let leftover = std::mem::take(&mut pending);
        let leftover = leftover.trim();
        if !leftover.is_empty() {
            if let Some(outcome) = self
                .consume_chunk(&parser, leftover, &mut state, &mut child, &command_display, sink)
                .await
            {
                return Ok(outcome);
            }
        }

        let status = child.wait().await?;
        if !status.success() {
            warn!("Transcode process failed: {}", status);
            return Ok(Outcome::Crashed(
                state.diagnostic(&command_display, format!("process exited with {}", status)),
            ));
        }

        if !self.validate {
            debug!("Validation disabled, reporting success on clean exit");
            return Ok(Outcome::Succeeded(ArtifactRef {
                path: destination.map(str::to_string),
                info: None,
            }));
        }

        classifier::classify(&command_display, destination, probe, &mut state, sink).await
    }

    /// Dispatch one complete chunk; returns a terminal outcome on abort
    async fn consume_chunk(
        &self,
        parser: &ProgressParser,
        chunk: &str,
        state: &mut RunState,
        child: &mut Child,
        display: &str,
        sink: &dyn ProgressSink,
    ) -> Option<Outcome> {
        match parser.parse_text(chunk) {
            ParsedChunk::Abort => {
                warn!("Error marker in process output: {}", chunk.trim());
                state.notes.push(chunk.trim().to_string());
                let _ = child.kill().await;
                let _ = child.wait().await;
                Some(Outcome::Crashed(state.diagnostic(
                    display,
                    "error marker detected in process output",
                )))
            }
            ParsedChunk::Progress(fraction) => {
                state.last_progress = fraction;
                sink.update(fraction);
                None
            }
        }
    }
}

/// Spawn a built command with its status stream piped
fn spawn_piped(command: &BuiltCommand) -> TransxResult<Child> {
    let mut cmd = match command {
        BuiltCommand::Argv { program, args } => {
            let mut cmd = Command::new(program);
            cmd.args(args);
            cmd
        }
        BuiltCommand::Raw(line) => {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(line);
            cmd
        }
    };

    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    cmd.spawn().map_err(|source| TransxError::SpawnError {
        command: command.display(),
        source,
    })
}
