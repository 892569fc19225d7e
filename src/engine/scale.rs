//! Pre-flight aspect-ratio dimension adjustment
//!
//! Common video encoders require even frame dimensions for yuv420p output, so
//! a derived width or height must be rounded onto the even grid before the
//! process is spawned.

use crate::config::AspectMode;

/// Round a raw dimension to an even integer.
///
/// Tie policy: take the ceiling; if even, use it; otherwise fall back to the
/// floor; if the result is still odd (ceiling == floor, both odd), increment
/// by one.
pub fn round_even(raw: f64) -> u32 {
    let ceiling = raw.ceil() as i64;
    let mut chosen = if ceiling % 2 == 0 {
        ceiling
    } else {
        raw.floor() as i64
    };
    if chosen % 2 != 0 {
        chosen += 1;
    }
    chosen.max(0) as u32
}

/// Derive the adjusted `(width, height)` for a preservation mode
pub fn adjusted_dimensions(mode: AspectMode, width: u32, height: u32, aspect_ratio: f64) -> (u32, u32) {
    match mode {
        AspectMode::None => (width, height),
        AspectMode::PreserveWidth => {
            let derived = round_even(width as f64 / aspect_ratio);
            (width, derived)
        }
        AspectMode::PreserveHeight => {
            let derived = round_even(height as f64 * aspect_ratio);
            (derived, height)
        }
    }
}

/// Apply the aspect mode to an output-options fragment in place.
///
/// Reads the requested resolution from the fragment's `-s WxH` setting,
/// derives the missing dimension from the aspect ratio, and writes the result
/// back, overwriting the prior value. A fragment without a resolution setting
/// is left untouched.
pub fn apply_aspect_mode(output_options: &mut [String], mode: AspectMode, aspect_ratio: f64) {
    if mode == AspectMode::None || aspect_ratio <= 0.0 {
        return;
    }

    let Some(value_idx) = find_size_value_index(output_options) else {
        return;
    };
    let Some((width, height)) = parse_size(&output_options[value_idx]) else {
        return;
    };

    let (new_width, new_height) = adjusted_dimensions(mode, width, height, aspect_ratio);
    output_options[value_idx] = format!("{}x{}", new_width, new_height);
}

/// Index of the value following a `-s` flag, if any
fn find_size_value_index(options: &[String]) -> Option<usize> {
    options
        .iter()
        .position(|arg| arg == "-s")
        .map(|idx| idx + 1)
        .filter(|&idx| idx < options.len())
}

/// Parse a `WxH` resolution string
pub fn parse_size(value: &str) -> Option<(u32, u32)> {
    let (width, height) = value.split_once('x')?;
    Some((width.parse().ok()?, height.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_ceiling_wins() {
        // raw 33.33: ceiling 34 is even
        assert_eq!(round_even(100.0 / 3.0), 34);
    }

    #[test]
    fn odd_ceiling_falls_back_to_floor() {
        // raw 50.5: ceiling 51 is odd, floor 50 is even
        assert_eq!(round_even(50.5), 50);
    }

    #[test]
    fn degenerate_odd_integer_increments() {
        // raw 33.0: ceiling == floor == 33, both odd
        assert_eq!(round_even(33.0), 34);
    }

    #[test]
    fn exact_even_passes_through() {
        assert_eq!(round_even(48.0), 48);
        assert_eq!(round_even(0.0), 0);
    }

    #[test]
    fn preserve_width_derives_height() {
        assert_eq!(
            adjusted_dimensions(AspectMode::PreserveWidth, 101, 999, 2.0),
            (101, 50)
        );
    }

    #[test]
    fn preserve_height_derives_width() {
        assert_eq!(
            adjusted_dimensions(AspectMode::PreserveHeight, 999, 100, 2.0),
            (200, 100)
        );
    }

    #[test]
    fn rewrites_size_option_in_place() {
        let mut options: Vec<String> = ["-c:v", "libx264", "-s", "101x720"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        apply_aspect_mode(&mut options, AspectMode::PreserveWidth, 2.0);
        assert_eq!(options[3], "101x50");
    }

    #[test]
    fn fragment_without_resolution_untouched() {
        let mut options: Vec<String> = ["-c:v", "libx264"].iter().map(|s| s.to_string()).collect();
        let before = options.clone();
        apply_aspect_mode(&mut options, AspectMode::PreserveWidth, 2.0);
        assert_eq!(options, before);
    }

    #[test]
    fn none_mode_is_a_no_op() {
        let mut options: Vec<String> = ["-s", "100x100"].iter().map(|s| s.to_string()).collect();
        apply_aspect_mode(&mut options, AspectMode::None, 2.0);
        assert_eq!(options[1], "100x100");
    }
}
