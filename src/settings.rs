// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Engine settings and configuration constants.
//!
//! The constants below are the defaults. `EngineSettings` carries the
//! values that a deployment may override from a TOML file. Colours live in
//! `theme.rs`.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// HIT TESTING
// ============================================================================
/// Screen-pixel tolerance added to the point marker radius
const POINT_HIT_RADIUS_PX: f64 = 30.0;

/// Rendered point marker radius (screen pixels)
const POINT_MARKER_RADIUS_PX: f64 = 4.0;

/// Screen-pixel tolerance for every line-like and circular object
const LINE_HIT_TOLERANCE_PX: f64 = 20.0;

// ============================================================================
// STROKES
// ============================================================================
/// Default stroke thickness for committed objects (screen pixels)
const STROKE_THICKNESS: f64 = 2.0;

// ============================================================================
// LABELS
// ============================================================================
const LABEL_POINT: &str = "P";
const LABEL_LINE: &str = "L";
const LABEL_SEGMENT: &str = "S";
const LABEL_CIRCLE: &str = "C";
const LABEL_FINE_CIRCLE: &str = "FC";
const LABEL_PARALLEL: &str = "PL";
const LABEL_TWO_LINES: &str = "TL";

// ============================================================================
// PUBLIC API
// ============================================================================

/// Hit-testing tolerances (screen pixels, converted at the current scale)
pub mod hit {
    pub const POINT_RADIUS_PX: f64 = super::POINT_HIT_RADIUS_PX;
    pub const POINT_MARKER_RADIUS_PX: f64 = super::POINT_MARKER_RADIUS_PX;
    pub const LINE_TOLERANCE_PX: f64 = super::LINE_HIT_TOLERANCE_PX;
}

/// Stroke defaults for committed objects
pub mod stroke {
    pub const THICKNESS: f64 = super::STROKE_THICKNESS;
}

/// Label prefixes, one per object kind
pub mod labels {
    pub const POINT: &str = super::LABEL_POINT;
    pub const LINE: &str = super::LABEL_LINE;
    pub const SEGMENT: &str = super::LABEL_SEGMENT;
    pub const CIRCLE: &str = super::LABEL_CIRCLE;
    pub const FINE_CIRCLE: &str = super::LABEL_FINE_CIRCLE;
    pub const PARALLEL: &str = super::LABEL_PARALLEL;
    pub const TWO_LINES: &str = super::LABEL_TWO_LINES;
}

// ============================================================================
// RUNTIME SETTINGS
// ============================================================================

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Tunables of one engine instance
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    pub point_hit_radius_px: f64,
    pub point_marker_radius_px: f64,
    pub line_hit_tolerance_px: f64,
    /// Maximum undo depth; unbounded when absent
    pub max_history: Option<usize>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            point_hit_radius_px: hit::POINT_RADIUS_PX,
            point_marker_radius_px: hit::POINT_MARKER_RADIUS_PX,
            line_hit_tolerance_px: hit::LINE_TOLERANCE_PX,
            max_history: None,
        }
    }
}

impl EngineSettings {
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: EngineSettings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("point_hit_radius_px", self.point_hit_radius_px),
            ("point_marker_radius_px", self.point_marker_radius_px),
            ("line_hit_tolerance_px", self.line_hit_tolerance_px),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid {
                    key,
                    reason: format!("expected a positive number, got {value}"),
                });
            }
        }
        if self.max_history == Some(0) {
            return Err(SettingsError::Invalid {
                key: "max_history",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Point hit radius in image units at `scale`
    pub fn point_tolerance(&self, scale: f64) -> f64 {
        (self.point_marker_radius_px + self.point_hit_radius_px) / scale
    }

    /// Line and circle hit tolerance in image units at `scale`
    pub fn line_tolerance(&self, scale: f64) -> f64 {
        self.line_hit_tolerance_px / scale
    }
}
