// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Full-state export and import between paired views

use super::EditSession;
use crate::editing::undo::UndoHistory;
use crate::model::{ObjectId, ObjectStore};
use serde::{Deserialize, Serialize};

/// Owned copy of everything a paired view needs to mirror a drawing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingState {
    pub store: ObjectStore,
    pub history: UndoHistory,
}

impl EditSession {
    pub fn drawing_state(&self) -> DrawingState {
        DrawingState {
            store: self.store.clone(),
            history: self.history.clone(),
        }
    }

    /// Replace the drawing with `state`.
    ///
    /// The selection is cleared and the active tool keeps its buffer. Ids in
    /// `state` are reserved so later commits never collide with them.
    pub fn set_drawing_state(&mut self, state: DrawingState) {
        if let Some(max) = state.store.max_id() {
            ObjectId::observe(max);
        }
        if let Some(max) = state.history.iter().map(|a| a.id).max() {
            ObjectId::observe(max);
        }
        self.store = state.store;
        self.history.replace_entries(&state.history);
        self.clear_selection();
        tracing::debug!(
            "[{}] imported drawing with {} object(s)",
            self.view_name,
            self.store.len()
        );
    }
}
