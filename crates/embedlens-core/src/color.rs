//! Color palettes for point groups.
//!
//! Two deterministic index-to-color schemes: a fixed-size categorical
//! palette for small group counts and a continuous perceptual ramp for
//! everything else. Callers must check the group count against
//! [`PALETTE_SIZE`] before relying on discrete colors; `discrete_color`
//! returns `None` past the end of the palette to make that check
//! unskippable.

use serde::{Deserialize, Serialize};

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub [u8; 3]);

impl Color {
    /// Render as a `#rrggbb` hex string for the UI layer
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

/// Number of colors in the categorical palette
pub const PALETTE_SIZE: usize = 12;

/// Qualitative palette for categorical groups, maximally distinguishable
const CATEGORICAL_PALETTE: [Color; PALETTE_SIZE] = [
    Color([0xa6, 0xce, 0xe3]),
    Color([0x1f, 0x78, 0xb4]),
    Color([0xb2, 0xdf, 0x8a]),
    Color([0x33, 0xa0, 0x2c]),
    Color([0xfb, 0x9a, 0x99]),
    Color([0xe3, 0x1a, 0x1c]),
    Color([0xfd, 0xbf, 0x6f]),
    Color([0xff, 0x7f, 0x00]),
    Color([0xca, 0xb2, 0xd6]),
    Color([0x6a, 0x3e, 0x9a]),
    Color([0xff, 0xff, 0x99]),
    Color([0xb1, 0x59, 0x28]),
];

/// Anchor stops of the sequential ramp (viridis), evenly spaced over [0, 1]
const SEQUENTIAL_STOPS: [Color; 5] = [
    Color([0x44, 0x01, 0x54]),
    Color([0x3b, 0x52, 0x8b]),
    Color([0x21, 0x91, 0x8c]),
    Color([0x5e, 0xc9, 0x62]),
    Color([0xfd, 0xe7, 0x25]),
];

/// Sentinel color for the unknown group
pub const UNKNOWN_COLOR: Color = Color([0x9c, 0xa3, 0xaf]);

/// Fixed color of the primary dataset group
pub const PRIMARY_COLOR: Color = Color([0x5e, 0x8b, 0xff]);

/// Fixed color of the reference dataset group
pub const REFERENCE_COLOR: Color = Color([0x9a, 0xff, 0xe5]);

/// Fixed color of the correct group
pub const CORRECT_COLOR: Color = Color([0x33, 0xa0, 0x2c]);

/// Fixed color of the incorrect group
pub const INCORRECT_COLOR: Color = Color([0xe3, 0x1a, 0x1c]);

/// Color for a categorical group index, `None` beyond the palette
pub fn discrete_color(index: usize) -> Option<Color> {
    CATEGORICAL_PALETTE.get(index).copied()
}

/// Color at `fraction` along the sequential perceptual ramp.
///
/// The fraction is clamped to [0, 1]; NaN maps to the low end.
pub fn sequential_color(fraction: f64) -> Color {
    let t = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    let scaled = t * (SEQUENTIAL_STOPS.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(SEQUENTIAL_STOPS.len() - 1);
    let local = scaled - lower as f64;
    interpolate(SEQUENTIAL_STOPS[lower], SEQUENTIAL_STOPS[upper], local)
}

/// Linear interpolation between two colors, `t` in [0, 1]
fn interpolate(a: Color, b: Color, t: f64) -> Color {
    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let blended = a.0[i] as f64 + (b.0[i] as f64 - a.0[i] as f64) * t;
        *channel = blended.round() as u8;
    }
    Color(rgb)
}
