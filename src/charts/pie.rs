//! @ai:module:intent Archetype shares as pie slices with a cyclic palette
//! @ai:module:layer domain
//! @ai:module:public_api pie_series, PieSlice, slice_color, PALETTE
//! @ai:module:stateless true

use crate::model::Archetype;
use serde::Serialize;

/// Slice colors, assigned by position and reused when archetypes outnumber them.
pub const PALETTE: [(u8, u8, u8); 6] = [
    (0x38, 0xBD, 0xF8),
    (0x81, 0x8C, 0xF8),
    (0xF4, 0x72, 0xB6),
    (0xFB, 0xBF, 0x24),
    (0x4A, 0xDE, 0x80),
    (0xA7, 0x8B, 0xFA),
];

/// @ai:intent One pie slice; value is the archetype percentage unchanged
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
}

impl PieSlice {
    /// @ai:intent Tooltip text shown for this slice
    /// @ai:effects pure
    pub fn tooltip(&self) -> String {
        format!("{}: {}%", self.name, self.value)
    }
}

/// @ai:intent Map archetypes to slices, preserving order and length
/// @ai:post result.len() == archetypes.len()
/// @ai:effects pure
pub fn pie_series(archetypes: &[Archetype]) -> Vec<PieSlice> {
    archetypes
        .iter()
        .map(|a| PieSlice {
            name: a.name.clone(),
            value: a.percentage,
        })
        .collect()
}

/// @ai:intent Palette entry for a slice index, wrapping around
/// @ai:effects pure
pub fn slice_rgb(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

/// @ai:intent Hex color for a slice index
/// @ai:effects pure
pub fn slice_color(index: usize) -> String {
    let (r, g, b) = slice_rgb(index);
    format!("#{r:02X}{g:02X}{b:02X}")
}
