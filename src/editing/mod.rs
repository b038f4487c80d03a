// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing model and interaction

pub mod events;
pub mod mouse;
pub mod selection;
pub mod session;
pub mod undo;
pub mod viewport;

pub use events::SessionEvent;
pub use mouse::{CursorShape, Modifiers, MouseButton, MouseEvent};
pub use selection::{Selection, SelectionTarget};
pub use session::{DrawingState, EditSession, MeasurementError, MeasurementKind};
pub use undo::{DrawingAction, UndoHistory};
pub use viewport::ViewPort;
