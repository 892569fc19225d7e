//! Command assembly for the encoder invocation

use crate::engine::Invocation;
use crate::utils::path::render_command_line;

/// Flag block enabling strict error detection in the encoder
const STRICT_FLAGS: [&str; 1] = ["-xerror"];

/// An executable command produced by the builder
#[derive(Debug, Clone, PartialEq)]
pub enum BuiltCommand {
    /// Argv vector, executed directly without a shell
    Argv { program: String, args: Vec<String> },
    /// Caller-supplied literal command line, executed via `sh -c` verbatim
    Raw(String),
}

impl BuiltCommand {
    /// Render the command for logs and failure diagnostics.
    ///
    /// Argv arguments containing shell metacharacters are quoted; raw
    /// overrides are shown exactly as supplied.
    pub fn display(&self) -> String {
        match self {
            BuiltCommand::Argv { program, args } => render_command_line(program, args),
            BuiltCommand::Raw(line) => line.clone(),
        }
    }
}

/// Pure builder assembling the encoder command line from an [`Invocation`]
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    binary: String,
}

impl CommandBuilder {
    /// Create a builder for the given encoder binary name
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Build the command for an invocation.
    ///
    /// A literal override is returned unchanged, with no escaping or
    /// validation. Otherwise the argv is assembled in fixed order: binary,
    /// overwrite flag, input options, strictness block (unless disabled),
    /// `-i` + source, output options, destination (when given). Deterministic
    /// and side-effect free.
    pub fn build(&self, invocation: &Invocation) -> BuiltCommand {
        if let Some(override_command) = &invocation.override_command {
            return BuiltCommand::Raw(override_command.clone());
        }

        let mut args: Vec<String> = Vec::new();
        args.push("-y".to_string());
        args.extend(invocation.input_options.iter().cloned());
        if invocation.strict {
            args.extend(STRICT_FLAGS.iter().map(|flag| flag.to_string()));
        }
        args.push("-i".to_string());
        args.push(invocation.source.clone());
        args.extend(invocation.output_options.iter().cloned());
        if let Some(destination) = &invocation.destination {
            args.push(destination.clone());
        }

        BuiltCommand::Argv {
            program: self.binary.clone(),
            args,
        }
    }
}
