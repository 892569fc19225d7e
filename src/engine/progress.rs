//! Progress sinks for run observers
//!
//! The supervisor pushes raw fractional values to a caller-supplied sink,
//! synchronously, in the order chunks are read. The sequence starts with 0.0,
//! carries no smoothing guarantee (malformed chunks yield 0.0, overruns may
//! exceed 1.0), and ends with 1.0 only on validated success.

use tokio::sync::mpsc;

/// Sink receiving fractional progress values during a run
pub trait ProgressSink: Send + Sync {
    /// Called once per observed progress value
    fn update(&self, fraction: f64);
}

impl<F> ProgressSink for F
where
    F: Fn(f64) + Send + Sync,
{
    fn update(&self, fraction: f64) {
        self(fraction)
    }
}

/// Console progress sink for CLI usage
pub struct ConsoleProgressSink;

impl ProgressSink for ConsoleProgressSink {
    fn update(&self, fraction: f64) {
        let percent = (fraction * 100.0).min(100.0);
        let bar_length = 20;
        let filled = ((percent / 100.0 * bar_length as f64) as usize).min(bar_length);
        let bar = "█".repeat(filled) + &"░".repeat(bar_length - filled);
        eprintln!("[{}] {:>5.1}%", bar, percent);
    }
}

/// JSON event sink for structured output
pub struct JsonProgressSink;

impl ProgressSink for JsonProgressSink {
    fn update(&self, fraction: f64) {
        let event = serde_json::json!({
            "event": "progress",
            "fraction": fraction,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        println!("{}", event);
    }
}

/// No-op sink for callers that do not observe progress
pub struct NoOpProgressSink;

impl ProgressSink for NoOpProgressSink {
    fn update(&self, _fraction: f64) {}
}

/// Channel-backed sink for asynchronous consumers.
///
/// Values are sent unbounded so the supervisor's read loop never blocks on a
/// slow consumer; a dropped receiver silently discards further updates.
pub struct ChannelProgressSink {
    sender: mpsc::UnboundedSender<f64>,
}

impl ChannelProgressSink {
    /// Create a sink and the receiving half for the consumer
    pub fn new() -> (Self, mpsc::UnboundedReceiver<f64>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ProgressSink for ChannelProgressSink {
    fn update(&self, fraction: f64) {
        let _ = self.sender.send(fraction);
    }
}
