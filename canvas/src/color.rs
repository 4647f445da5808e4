//! Color tokens: `#rgb` / `#rrggbb` parsing, canonicalization, and the pen palette.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use tiny_skia::Color;

/// Pen colors offered by the sketch toolbar, in display order.
pub const PALETTE: [&str; 12] = [
    "#000000", "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF", "#FFA500", "#800080", "#FFC0CB",
    "#A52A2A", "#808080",
];

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = hex_byte(&hex[0..1].repeat(2))?;
            let g = hex_byte(&hex[1..2].repeat(2))?;
            let b = hex_byte(&hex[2..3].repeat(2))?;
            Some((r, g, b))
        }
        6 => {
            let r = hex_byte(&hex[0..2])?;
            let g = hex_byte(&hex[2..4])?;
            let b = hex_byte(&hex[4..6])?;
            Some((r, g, b))
        }
        _ => None,
    }
}

fn hex_byte(pair: &str) -> Option<u8> {
    match u8::from_str_radix(pair, 16) {
        Ok(v) => Some(v),
        Err(_) => None,
    }
}

/// Canonical lowercase `#rrggbb` form of a token, or `None` if it does not parse.
#[must_use]
pub fn canonical_hex(raw: &str) -> Option<String> {
    let (r, g, b) = parse_hex_rgb(raw)?;
    Some(format!("#{r:02x}{g:02x}{b:02x}"))
}

/// Opaque paint color for a token, falling back to `fallback` when it does not parse.
#[must_use]
pub fn paint_color(raw: &str, fallback: Color) -> Color {
    match parse_hex_rgb(raw) {
        Some((r, g, b)) => Color::from_rgba8(r, g, b, 255),
        None => fallback,
    }
}
