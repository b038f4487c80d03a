// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Mouse input delivered by the surrounding display layer

use kurbo::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Keyboard modifiers held during a mouse event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { ctrl: false };
    pub const CTRL: Modifiers = Modifiers { ctrl: true };
}

/// A mouse event in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub pos: Point,
    pub button: MouseButton,
    pub mods: Modifiers,
}

impl MouseEvent {
    pub fn new(pos: Point, button: MouseButton, mods: Modifiers) -> Self {
        Self { pos, button, mods }
    }

    pub fn left(pos: Point) -> Self {
        Self::new(pos, MouseButton::Left, Modifiers::NONE)
    }

    pub fn right(pos: Point) -> Self {
        Self::new(pos, MouseButton::Right, Modifiers::NONE)
    }

    pub fn with_ctrl(mut self) -> Self {
        self.mods = Modifiers::CTRL;
        self
    }
}

/// Pointer shape the display layer should show over the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    #[default]
    Arrow,
    /// A construction tool is armed
    Crosshair,
}
