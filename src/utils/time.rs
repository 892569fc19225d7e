//! Clock-time parsing and formatting utilities

/// Parse a strict `HH:MM:SS.ff` clock time into seconds.
///
/// This is the format ffmpeg prints in its stats lines (`time=00:01:23.45`).
/// Returns `None` for anything that does not have exactly three colon-separated
/// numeric fields; callers treat that as a soft failure, not an error.
pub fn parse_clock_time(time_str: &str) -> Option<f64> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 3 {
        return None;
    }

    let hours: f64 = parts[0].parse().ok()?;
    let minutes: f64 = parts[1].parse().ok()?;
    let seconds: f64 = parts[2].parse().ok()?;

    if hours < 0.0 || minutes < 0.0 || seconds < 0.0 {
        return None;
    }

    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Format seconds as an `HH:MM:SS.ms` string
pub fn format_clock_time(seconds: f64) -> String {
    let total = seconds.max(0.0);
    let hours = (total / 3600.0) as u32;
    let minutes = ((total % 3600.0) / 60.0) as u32;
    let secs = (total % 60.0) as u32;
    let milliseconds = ((total % 1.0) * 1000.0) as u32;

    format!(
        "{:02}:{:02}:{:02}.{:03}",
        hours, minutes, secs, milliseconds
    )
}
