//! Shared utilities

pub mod path;
pub mod time;

pub use path::{render_command_line, shell_quote};
pub use time::{format_clock_time, parse_clock_time};
