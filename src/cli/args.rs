//! Command-line argument definitions

use clap::Args;

/// Arguments for the transcode command
#[derive(Args, Debug)]
pub struct TranscodeArgs {
    /// Source media file path
    #[arg(short, long)]
    pub input: String,

    /// Destination file path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Encoder option placed before -i (repeatable)
    #[arg(long = "in-opt", value_name = "ARG", allow_hyphen_values = true)]
    pub input_options: Vec<String>,

    /// Encoder option placed after -i (repeatable)
    #[arg(long = "out-opt", value_name = "ARG", allow_hyphen_values = true)]
    pub output_options: Vec<String>,

    /// Inactivity timeout in seconds (0 disables the watchdog)
    #[arg(long, env = "TRANSX_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Skip output artifact validation
    #[arg(long)]
    pub no_validate: bool,

    /// Disable the error-strictness flag block
    #[arg(long)]
    pub no_strict: bool,

    /// Aspect-ratio preservation mode (none, width, height)
    #[arg(long, value_name = "MODE")]
    pub aspect: Option<String>,

    /// Literal command override, executed verbatim instead of the built command
    #[arg(long, value_name = "COMMAND")]
    pub raw: Option<String>,

    /// Emit progress as JSON events on stdout
    #[arg(long)]
    pub json_progress: bool,

    /// Suppress the progress display
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Media file path
    #[arg(short, long)]
    pub input: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
