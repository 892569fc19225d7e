//! Path and command-line display helpers

/// Quote a single argument for safe display in a shell-style command line.
///
/// Built invocations execute as an argv vector, so this quoting is only for
/// the rendered command string used in logs and failure diagnostics. Arguments
/// made of plain filename characters pass through unchanged; anything else is
/// wrapped in single quotes with embedded quotes escaped.
pub fn shell_quote(arg: &str) -> String {
    if !arg.is_empty() && arg.chars().all(is_safe_char) {
        return arg.to_string();
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('\'');
    for ch in arg.chars() {
        if ch == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    quoted
}

fn is_safe_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.' | '/' | ':' | '=' | '+' | ',' | '@' | '%')
}

/// Render an argv vector as a display command line
pub fn render_command_line(program: &str, args: &[String]) -> String {
    let mut line = shell_quote(program);
    for arg in args {
        line.push(' ');
        line.push_str(&shell_quote(arg));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_args_unquoted() {
        assert_eq!(shell_quote("input.mp4"), "input.mp4");
        assert_eq!(shell_quote("/tmp/out/video.mkv"), "/tmp/out/video.mkv");
        assert_eq!(shell_quote("-crf=18"), "-crf=18");
    }

    #[test]
    fn special_args_quoted() {
        assert_eq!(shell_quote("my video.mp4"), "'my video.mp4'");
        assert_eq!(shell_quote("a\"b"), "'a\"b'");
        assert_eq!(shell_quote("it's.mp4"), "'it'\\''s.mp4'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn renders_full_line() {
        let args = vec!["-y".to_string(), "my file.mp4".to_string()];
        assert_eq!(render_command_line("ffmpeg", &args), "ffmpeg -y 'my file.mp4'");
    }
}
