// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Undo history of construction actions.
//!
//! Each entry names the object it created by kind and [`ObjectId`], so
//! undoing never depends on where the object currently sits in its
//! collection. There is no redo.

use crate::model::{ObjectId, ObjectKind};
use serde::{Deserialize, Serialize};

/// One committed construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingAction {
    pub kind: ObjectKind,
    pub id: ObjectId,
}

/// LIFO stack of construction actions (most recent last)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UndoHistory {
    undo_stack: Vec<DrawingAction>,
    #[serde(skip)]
    max_len: Option<usize>,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A history that drops its oldest entries beyond `max_len`
    pub fn with_limit(max_len: Option<usize>) -> Self {
        Self {
            undo_stack: Vec::new(),
            max_len,
        }
    }

    pub fn set_limit(&mut self, max_len: Option<usize>) {
        self.max_len = max_len;
        self.trim();
    }

    pub fn push(&mut self, action: DrawingAction) {
        self.undo_stack.push(action);
        self.trim();
    }

    /// Pop the most recent action
    pub fn pop(&mut self) -> Option<DrawingAction> {
        self.undo_stack.pop()
    }

    /// Remove the entries of objects that no longer exist
    pub fn forget(&mut self, ids: &[ObjectId]) {
        self.undo_stack.retain(|action| !ids.contains(&action.id));
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawingAction> {
        self.undo_stack.iter()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
    }

    /// Replace the entries, keeping this history's limit
    pub(crate) fn replace_entries(&mut self, other: &UndoHistory) {
        self.undo_stack = other.undo_stack.clone();
        self.trim();
    }

    fn trim(&mut self) {
        if let Some(max) = self.max_len {
            let excess = self.undo_stack.len().saturating_sub(max);
            if excess > 0 {
                self.undo_stack.drain(..excess);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(kind: ObjectKind) -> DrawingAction {
        DrawingAction {
            kind,
            id: ObjectId::next(),
        }
    }

    #[test]
    fn pops_in_lifo_order() {
        let mut history = UndoHistory::new();
        let a = action(ObjectKind::Point);
        let b = action(ObjectKind::Line);
        history.push(a);
        history.push(b);
        assert_eq!(history.pop(), Some(b));
        assert_eq!(history.pop(), Some(a));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn empty_history_cannot_undo() {
        let history = UndoHistory::new();
        assert!(!history.can_undo());
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn limit_drops_oldest() {
        let mut history = UndoHistory::with_limit(Some(2));
        let actions: Vec<_> = (0..3).map(|_| action(ObjectKind::Circle)).collect();
        for a in &actions {
            history.push(*a);
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), actions[1..]);
    }

    #[test]
    fn forget_removes_only_named_ids() {
        let mut history = UndoHistory::new();
        let a = action(ObjectKind::Point);
        let b = action(ObjectKind::Point);
        history.push(a);
        history.push(b);
        history.forget(&[a.id]);
        assert_eq!(history.len(), 1);
        assert_eq!(history.pop(), Some(b));
    }
}
