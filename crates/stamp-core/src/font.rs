//! Base-14 font metrics
//!
//! Glyph advance widths for Helvetica and Helvetica-Bold in 1/1000 em
//! units, taken from the Adobe AFM files for the two faces. Used to
//! measure lines for center/right alignment. Unknown glyphs get an
//! average width so measurement degrades gracefully instead of failing.

/// Width of a single character in 1/1000 em units
pub fn char_width(c: char, bold: bool) -> u32 {
    if bold {
        helvetica_bold_width(c)
    } else {
        helvetica_width(c)
    }
}

/// Measured width of a string at the given font size, in points
pub fn text_width(text: &str, size: f64, bold: bool) -> f64 {
    let units: u32 = text.chars().map(|c| char_width(c, bold)).sum();
    units as f64 * size / 1000.0
}

fn helvetica_width(c: char) -> u32 {
    match c {
        ' ' | '!' | ',' | '.' | '/' | ':' | ';' | '[' | '\\' | ']' => 278,
        '"' => 355,
        '#' | '$' | '_' => 556,
        '%' => 889,
        '&' => 667,
        '\'' => 222,
        '(' | ')' | '-' | '`' => 333,
        '*' => 389,
        '+' | '<' | '=' | '>' | '~' => 584,
        '0'..='9' => 556,
        '?' => 556,
        '@' => 1015,
        '^' => 469,
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 722,
        'F' | 'T' | 'Z' => 611,
        'G' | 'O' | 'Q' => 778,
        'I' => 278,
        'J' => 500,
        'L' => 556,
        'M' => 833,
        'W' => 944,
        'a' | 'b' | 'd' | 'e' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' => 556,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 500,
        'f' | 't' => 278,
        'i' | 'j' | 'l' => 222,
        'm' => 833,
        'r' => 333,
        'w' => 722,
        '{' | '}' => 334,
        '|' => 260,
        _ => 500,
    }
}

fn helvetica_bold_width(c: char) -> u32 {
    match c {
        ' ' | ',' | '.' | '/' | '\\' => 278,
        '!' | '(' | ')' | '-' | ':' | ';' | '[' | ']' | '`' => 333,
        '"' => 474,
        '#' | '$' | '_' => 556,
        '%' => 889,
        '&' => 722,
        '\'' => 278,
        '*' => 389,
        '+' | '<' | '=' | '>' | '~' => 584,
        '0'..='9' => 556,
        '?' => 611,
        '@' => 975,
        '^' => 581,
        'A' | 'B' | 'C' | 'D' | 'H' | 'K' | 'N' | 'R' | 'U' => 722,
        'E' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
        'F' | 'L' | 'T' | 'Z' => 611,
        'G' | 'O' | 'Q' => 778,
        'I' => 278,
        'J' => 556,
        'M' => 833,
        'W' => 944,
        'a' | 'c' | 'e' | 'k' | 's' | 'v' | 'x' | 'y' => 556,
        'b' | 'd' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' => 611,
        'f' | 't' => 333,
        'i' | 'j' | 'l' => 278,
        'm' => 889,
        'r' => 389,
        'w' => 778,
        'z' => 500,
        '{' | '}' => 389,
        '|' => 280,
        _ => 500,
    }
}
