//! Color utility functions for label buttons.
//!
//! Labels get a stable color derived from their id so the same label keeps
//! its color across samples and sessions.

use crate::constants::LABEL_ALPHABET;

/// Preset label colors (Material 600 shades), as RGB.
///
/// Blue appears twice; the palette size is part of the hash and must stay 11.
pub const LABEL_PALETTE: [[u8; 3]; 11] = [
    [0x1e, 0x88, 0xe5], // blue
    [0x43, 0xa0, 0x47], // green
    [0xe5, 0x39, 0x35], // red
    [0xf4, 0x51, 0x1e], // deep orange
    [0xd8, 0x1b, 0x60], // pink
    [0x00, 0x89, 0x7b], // teal
    [0x5e, 0x35, 0xb1], // deep purple
    [0x39, 0x49, 0xab], // indigo
    [0x1e, 0x88, 0xe5], // blue
    [0x00, 0xac, 0xc1], // cyan
    [0x8e, 0x24, 0xaa], // purple
];

/// Position of `c` in the label alphabet, if it is part of it.
pub fn alphabet_position(c: char) -> Option<usize> {
    LABEL_ALPHABET.chars().position(|letter| letter == c)
}

/// Hash a label id by summing the alphabet positions of its characters.
///
/// Characters outside the alphabet (including uppercase) contribute 0.
pub fn label_hash(id: &str) -> usize {
    id.chars().filter_map(alphabet_position).sum()
}

/// Index into [`LABEL_PALETTE`] for a label id.
pub fn label_color_index(id: &str) -> usize {
    label_hash(id) % LABEL_PALETTE.len()
}

/// RGB color for a label id.
pub fn label_color(id: &str) -> [u8; 3] {
    LABEL_PALETTE[label_color_index(id)]
}

/// Format an RGB color as a `#rrggbb` hex string.
pub fn to_hex(color: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}
