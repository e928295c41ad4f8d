//! Hex color parsing for text styling

/// Parse a hex color like "#FF0000", "ff0000" or "#f00" into RGB floats
/// in the 0-1 range. Anything unparseable falls back to black so a bad
/// color never fails a whole request.
pub fn parse_hex_color(color: &str) -> (f32, f32, f32) {
    const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);

    let hex = color.trim().trim_start_matches('#');

    let expanded;
    let hex = match hex.len() {
        // Short form "f00" doubles each digit
        3 => {
            expanded = hex.chars().flat_map(|c| [c, c]).collect::<String>();
            expanded.as_str()
        }
        6 => hex,
        _ => return BLACK,
    };

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    match (channel(0), channel(2), channel(4)) {
        (Ok(r), Ok(g), Ok(b)) => (
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
        ),
        _ => BLACK,
    }
}
