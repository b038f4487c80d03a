// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Overlay colours
//!
//! All colors use hexadecimal format: Color::from_rgb8(0xRR, 0xGG, 0xBB)

use crate::model::StrokeColor;
use peniko::Color;

// ============================================================================
// STROKES
// ============================================================================
const STROKE_GREEN: Color = Color::from_rgb8(0x00, 0xff, 0x00);
const STROKE_RED: Color = Color::from_rgb8(0xff, 0x00, 0x00);
const STROKE_MAGENTA: Color = Color::from_rgb8(0xff, 0x00, 0xff);
const STROKE_BLUE: Color = Color::from_rgb8(0x00, 0x00, 0xff);

// ============================================================================
// INTERACTION
// ============================================================================
/// Selected objects are redrawn in this colour
const SELECTION_HIGHLIGHT: Color = Color::from_rgb8(0xff, 0xa5, 0x00);

/// In-progress construction preview
const PREVIEW: Color = Color::from_rgb8(0x00, 0xbf, 0xff);

/// Parallel midlines and two-lines bisectors
const AUXILIARY_LINE: Color = Color::from_rgb8(0xff, 0xff, 0x00);

// ============================================================================
// PUBLIC API
// ============================================================================

pub mod stroke {
    use super::*;

    pub const GREEN: Color = super::STROKE_GREEN;
    pub const RED: Color = super::STROKE_RED;
    pub const MAGENTA: Color = super::STROKE_MAGENTA;
    pub const BLUE: Color = super::STROKE_BLUE;

    /// Concrete colour for a named stroke colour
    pub fn color(named: StrokeColor) -> Color {
        match named {
            StrokeColor::Green => GREEN,
            StrokeColor::Red => RED,
            StrokeColor::Magenta => MAGENTA,
            StrokeColor::Blue => BLUE,
        }
    }
}

pub mod interaction {
    use super::*;

    pub const SELECTED: Color = super::SELECTION_HIGHLIGHT;
    pub const PREVIEW: Color = super::PREVIEW;
    pub const AUXILIARY: Color = super::AUXILIARY_LINE;
}

/// `#rrggbbaa` form used in exported snapshots
pub fn to_hex(color: Color) -> String {
    let c = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
}
