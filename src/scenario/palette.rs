//! Display colors for scenario entries, assigned by list position.

use bevy::color::Srgba;
use bevy::prelude::*;

/// Red, orange, green, blue, purple.
const SCENARIO_PALETTE: [(u8, u8, u8); 5] = [
    (0xef, 0x44, 0x44),
    (0xf5, 0x9e, 0x0b),
    (0x10, 0xb9, 0x81),
    (0x3b, 0x82, 0xf6),
    (0x8b, 0x5c, 0xf6),
];

/// Positions past the end of the palette wrap around.
pub fn palette_index(position: usize) -> usize {
    position % SCENARIO_PALETTE.len()
}

pub fn entry_color(position: usize) -> Color {
    let (r, g, b) = SCENARIO_PALETTE[palette_index(position)];
    Color::srgb_u8(r, g, b)
}

/// Colors assigned by the service (`"#rrggbb"`), falling back to the local palette.
pub fn color_from_hex(hex: &str, position: usize) -> Color {
    Srgba::hex(hex)
        .map(Color::from)
        .unwrap_or_else(|_| entry_color(position))
}
