//! Run orchestration: pre-flight, command build, supervision

use tracing::{debug, info};

use crate::config::{AspectMode, TranscodeConfig};
use crate::engine::command::CommandBuilder;
use crate::engine::progress::ProgressSink;
use crate::engine::supervisor::Supervisor;
use crate::engine::{scale, Invocation, Outcome};
use crate::error::{TransxError, TransxResult};
use crate::probe::MediaProbe;
use crate::utils::format_clock_time;

/// Top-level transcode engine tying pre-flight, builder and supervisor together
pub struct Transcoder {
    config: TranscodeConfig,
}

impl Transcoder {
    /// Create a transcoder with the given configuration
    pub fn new(config: TranscodeConfig) -> Self {
        Self { config }
    }

    /// Access the active configuration
    pub fn config(&self) -> &TranscodeConfig {
        &self.config
    }

    /// Execute one invocation to its terminal outcome.
    ///
    /// Pre-flight: the source is probed once for total duration and aspect
    /// ratio; the aspect-ratio adjustment rewrites the output-options
    /// resolution when requested and applicable. The invocation is then
    /// frozen, built into a command, and handed to the supervisor.
    pub async fn run(
        &self,
        invocation: Invocation,
        probe: &dyn MediaProbe,
        sink: &dyn ProgressSink,
    ) -> TransxResult<Outcome> {
        let mut invocation = invocation;

        if invocation.override_command.is_none() {
            if let Some(override_command) = &self.config.override_command {
                invocation.override_command = Some(override_command.clone());
            }
        }

        // Built invocations need the encoder binary on PATH; raw overrides
        // name their own executable.
        if invocation.override_command.is_none() {
            which::which(&self.config.ffmpeg_binary).map_err(|_| TransxError::BinaryNotFound {
                name: self.config.ffmpeg_binary.clone(),
            })?;
        }

        let source_info = probe.inspect(&invocation.source).await?;
        let total_duration = source_info
            .as_ref()
            .map(|info| info.duration)
            .filter(|duration| *duration > 0.0);
        match total_duration {
            Some(duration) => debug!("Source duration: {}", format_clock_time(duration)),
            None => debug!("Source duration unknown, progress will report 0.0"),
        }

        if invocation.override_command.is_none() && self.config.aspect_mode != AspectMode::None {
            if let Some(ratio) = source_info.as_ref().and_then(|info| info.aspect_ratio) {
                info!("Applying aspect adjustment ({:?}, ratio {:.4})", self.config.aspect_mode, ratio);
                scale::apply_aspect_mode(
                    &mut invocation.output_options,
                    self.config.aspect_mode,
                    ratio,
                );
            }
        }

        let command = CommandBuilder::new(&self.config.ffmpeg_binary).build(&invocation);
        let supervisor = Supervisor::new()
            .with_timeout(self.config.timeout())
            .with_validation(self.config.validate);

        supervisor
            .run(
                &command,
                total_duration,
                invocation.destination.as_deref(),
                probe,
                sink,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::engine::progress::NoOpProgressSink;
    use crate::probe::MediaInfo;

    /// Probe stub reporting a fixed source and destination state
    struct FakeProbe {
        source_info: Option<MediaInfo>,
        dest_info: Option<MediaInfo>,
        calls: AtomicUsize,
    }

    impl FakeProbe {
        fn new(source_info: Option<MediaInfo>, dest_info: Option<MediaInfo>) -> Self {
            Self {
                source_info,
                dest_info,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MediaProbe for FakeProbe {
        async fn inspect(&self, file_path: &str) -> TransxResult<Option<MediaInfo>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if file_path == "source.mov" {
                Ok(self.source_info.clone())
            } else {
                Ok(self.dest_info.clone())
            }
        }
    }

    fn media(duration: f64, aspect_ratio: Option<f64>) -> MediaInfo {
        MediaInfo {
            valid: true,
            duration,
            aspect_ratio,
            width: None,
            height: None,
        }
    }

    #[tokio::test]
    async fn validation_disabled_skips_destination_probe() {
        let config = TranscodeConfig {
            validate: false,
            ..Default::default()
        };
        let probe = FakeProbe::new(Some(media(10.0, None)), None);
        let transcoder = Transcoder::new(config);

        let invocation =
            Invocation::new("source.mov").with_override_command("true");
        let outcome = transcoder
            .run(invocation, &probe, &NoOpProgressSink)
            .await
            .unwrap();

        assert!(outcome.is_success());
        // Only the source was probed.
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn aspect_adjustment_rewrites_resolution() {
        let config = TranscodeConfig {
            validate: false,
            aspect_mode: AspectMode::PreserveWidth,
            // /usr/bin/true ignores its argv, so the which() check and the
            // spawn both succeed without ffmpeg installed.
            ffmpeg_binary: "true".to_string(),
            ..Default::default()
        };
        let probe = FakeProbe::new(Some(media(10.0, Some(2.0))), None);
        let transcoder = Transcoder::new(config);

        // The run exercises the full path; the rewrite itself is asserted
        // through the scale module, so here we only require a clean outcome.
        let invocation = Invocation::new("source.mov")
            .with_output_options(["-s", "101x720"])
            .with_destination("dest.mp4");
        let outcome = transcoder
            .run(invocation, &probe, &NoOpProgressSink)
            .await
            .unwrap();
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn unknown_source_disables_duration() {
        // Source absent: progress must degrade to 0.0, and a clean exit with
        // validation disabled still succeeds.
        let config = TranscodeConfig {
            validate: false,
            ..Default::default()
        };
        let probe = FakeProbe::new(None, None);
        let transcoder = Transcoder::new(config);

        let invocation = Invocation::new("source.mov").with_override_command("true");
        let outcome = transcoder
            .run(invocation, &probe, &NoOpProgressSink)
            .await
            .unwrap();
        assert!(outcome.is_success());
    }
}
