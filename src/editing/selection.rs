// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Immutable selection set for tracking which objects are selected.
//!
//! `Selection` wraps an `Arc<BTreeSet<SelectionTarget>>` so it can be
//! cheaply cloned into render snapshots. Mutations produce a new set
//! (copy-on-write). The `BTreeSet` orders targets by kind and then by id,
//! which is commit order within a kind.

use crate::model::{ObjectId, ObjectKind};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Something a click can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SelectionTarget {
    Object(ObjectKind, ObjectId),
    /// The midline of a parallel object
    Midline(ObjectId),
    /// The angle bisector of a two-lines object
    Bisector(ObjectId),
}

impl SelectionTarget {
    /// The object this target belongs to
    pub fn owner(&self) -> (ObjectKind, ObjectId) {
        match *self {
            SelectionTarget::Object(kind, id) => (kind, id),
            SelectionTarget::Midline(id) => (ObjectKind::Parallel, id),
            SelectionTarget::Bisector(id) => (ObjectKind::TwoLines, id),
        }
    }
}

/// A set of selected targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    inner: Arc<BTreeSet<SelectionTarget>>,
}

impl Selection {
    /// Create a new empty selection
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BTreeSet::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn contains(&self, target: &SelectionTarget) -> bool {
        self.inner.contains(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectionTarget> {
        self.inner.iter()
    }

    pub fn insert(&mut self, target: SelectionTarget) {
        Arc::make_mut(&mut self.inner).insert(target);
    }

    pub fn remove(&mut self, target: &SelectionTarget) {
        Arc::make_mut(&mut self.inner).remove(target);
    }

    /// Add the target if absent, remove it if present
    pub fn toggle(&mut self, target: SelectionTarget) {
        let set = Arc::make_mut(&mut self.inner);
        if !set.remove(&target) {
            set.insert(target);
        }
    }

    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.inner = Arc::new(BTreeSet::new());
        }
    }

    /// Ids of whole objects of `kind` in the selection
    pub fn ids_of(&self, kind: ObjectKind) -> Vec<ObjectId> {
        self.inner
            .iter()
            .filter_map(|target| match *target {
                SelectionTarget::Object(k, id) if k == kind => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn count_of(&self, kind: ObjectKind) -> usize {
        self.ids_of(kind).len()
    }

    pub fn midlines(&self) -> Vec<ObjectId> {
        self.inner
            .iter()
            .filter_map(|target| match *target {
                SelectionTarget::Midline(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn bisectors(&self) -> Vec<ObjectId> {
        self.inner
            .iter()
            .filter_map(|target| match *target {
                SelectionTarget::Bisector(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Drop every target whose owning object is no longer wanted
    pub fn retain(&mut self, mut keep: impl FnMut(&SelectionTarget) -> bool) {
        if self.inner.iter().all(&mut keep) {
            return;
        }
        Arc::make_mut(&mut self.inner).retain(keep);
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}
