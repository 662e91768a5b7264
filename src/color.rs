//! Palette color handling
//!
//! Palette entries arrive as CSS hex triples. A malformed entry must never
//! fail a draw; it resolves to white instead.

/// Parse an `rrggbb` hex triple. Leading `#` is optional.
pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some([r, g, b])
}

/// Resolve a hex triple to a render color with the given alpha.
/// Unrecognized input keeps the alpha but renders white.
pub fn rgba(hex: &str, alpha: f32) -> [f32; 4] {
    match parse_hex(hex) {
        Some([r, g, b]) => [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            alpha,
        ],
        None => [1.0, 1.0, 1.0, alpha],
    }
}
