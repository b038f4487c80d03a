// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Typed collections of committed objects.
//!
//! Each kind lives in its own map keyed by [`ObjectId`]. Ids grow
//! monotonically, so iterating a map yields objects in commit order and
//! removing one object never disturbs the others.

use super::object_id::ObjectId;
use super::objects::{
    CircleObject, FineCircleObject, LineObject, LineSegmentObject, ObjectKind, ParallelObject,
    PointObject, TwoLinesObject,
};
use crate::settings::labels;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Collection<T> = BTreeMap<ObjectId, T>;

/// An object type that has its own collection in the store
pub trait StoredObject: Clone + 'static {
    const KIND: ObjectKind;
    const LABEL_PREFIX: &'static str;

    fn collection(store: &ObjectStore) -> &Collection<Self>;
    fn collection_mut(store: &mut ObjectStore) -> &mut Collection<Self>;

    fn label(&self) -> &str;
    fn set_label(&mut self, label: String);

    /// Human-readable measurement result, if the kind has one
    fn summary(&self) -> Option<String>;
}

/// All committed objects of one view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectStore {
    points: Collection<PointObject>,
    lines: Collection<LineObject>,
    segments: Collection<LineSegmentObject>,
    circles: Collection<CircleObject>,
    fine_circles: Collection<FineCircleObject>,
    parallels: Collection<ParallelObject>,
    two_lines: Collection<TwoLinesObject>,
    /// Per-kind label counters; never decremented
    label_counters: [u32; 7],
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object and return its id.
    ///
    /// Objects without a label receive the next `<prefix><n>` label of their
    /// kind.
    pub fn add<T: StoredObject>(&mut self, mut object: T) -> ObjectId {
        if object.label().is_empty() {
            let counter = &mut self.label_counters[T::KIND.index()];
            *counter += 1;
            object.set_label(format!("{}{}", T::LABEL_PREFIX, counter));
        }
        let id = ObjectId::next();
        T::collection_mut(self).insert(id, object);
        id
    }

    pub fn get<T: StoredObject>(&self, id: ObjectId) -> Option<&T> {
        T::collection(self).get(&id)
    }

    /// Iterate over one kind in commit order
    pub fn iter<T: StoredObject>(&self) -> impl Iterator<Item = (ObjectId, &T)> + '_ {
        T::collection(self).iter().map(|(id, obj)| (*id, obj))
    }

    /// Remove an object; returns false if it was not present
    pub fn remove(&mut self, kind: ObjectKind, id: ObjectId) -> bool {
        match kind {
            ObjectKind::Point => self.points.remove(&id).is_some(),
            ObjectKind::Line => self.lines.remove(&id).is_some(),
            ObjectKind::LineSegment => self.segments.remove(&id).is_some(),
            ObjectKind::Circle => self.circles.remove(&id).is_some(),
            ObjectKind::FineCircle => self.fine_circles.remove(&id).is_some(),
            ObjectKind::Parallel => self.parallels.remove(&id).is_some(),
            ObjectKind::TwoLines => self.two_lines.remove(&id).is_some(),
        }
    }

    pub fn contains(&self, kind: ObjectKind, id: ObjectId) -> bool {
        match kind {
            ObjectKind::Point => self.points.contains_key(&id),
            ObjectKind::Line => self.lines.contains_key(&id),
            ObjectKind::LineSegment => self.segments.contains_key(&id),
            ObjectKind::Circle => self.circles.contains_key(&id),
            ObjectKind::FineCircle => self.fine_circles.contains_key(&id),
            ObjectKind::Parallel => self.parallels.contains_key(&id),
            ObjectKind::TwoLines => self.two_lines.contains_key(&id),
        }
    }

    pub fn count(&self, kind: ObjectKind) -> usize {
        match kind {
            ObjectKind::Point => self.points.len(),
            ObjectKind::Line => self.lines.len(),
            ObjectKind::LineSegment => self.segments.len(),
            ObjectKind::Circle => self.circles.len(),
            ObjectKind::FineCircle => self.fine_circles.len(),
            ObjectKind::Parallel => self.parallels.len(),
            ObjectKind::TwoLines => self.two_lines.len(),
        }
    }

    pub fn len(&self) -> usize {
        ObjectKind::ALL.iter().map(|kind| self.count(*kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest id in the store, if any
    pub fn max_id(&self) -> Option<ObjectId> {
        [
            self.points.keys().next_back(),
            self.lines.keys().next_back(),
            self.segments.keys().next_back(),
            self.circles.keys().next_back(),
            self.fine_circles.keys().next_back(),
            self.parallels.keys().next_back(),
            self.two_lines.keys().next_back(),
        ]
        .into_iter()
        .flatten()
        .max()
        .copied()
    }

    /// Drop every object. Label counters keep counting.
    pub fn clear(&mut self) {
        self.points.clear();
        self.lines.clear();
        self.segments.clear();
        self.circles.clear();
        self.fine_circles.clear();
        self.parallels.clear();
        self.two_lines.clear();
    }
}

macro_rules! stored_object {
    ($ty:ty, $kind:expr, $prefix:expr, $field:ident, |$obj:ident| $summary:expr) => {
        impl StoredObject for $ty {
            const KIND: ObjectKind = $kind;
            const LABEL_PREFIX: &'static str = $prefix;

            fn collection(store: &ObjectStore) -> &Collection<Self> {
                &store.$field
            }

            fn collection_mut(store: &mut ObjectStore) -> &mut Collection<Self> {
                &mut store.$field
            }

            fn label(&self) -> &str {
                &self.label
            }

            fn set_label(&mut self, label: String) {
                self.label = label;
            }

            fn summary(&self) -> Option<String> {
                let $obj = self;
                $summary
            }
        }
    };
}

stored_object!(PointObject, ObjectKind::Point, labels::POINT, points, |_p| None);
stored_object!(LineObject, ObjectKind::Line, labels::LINE, lines, |l| Some(l.summary()));
stored_object!(
    LineSegmentObject,
    ObjectKind::LineSegment,
    labels::SEGMENT,
    segments,
    |s| Some(s.summary())
);
stored_object!(CircleObject, ObjectKind::Circle, labels::CIRCLE, circles, |c| Some(
    c.summary()
));
stored_object!(
    FineCircleObject,
    ObjectKind::FineCircle,
    labels::FINE_CIRCLE,
    fine_circles,
    |c| Some(c.summary())
);
stored_object!(
    ParallelObject,
    ObjectKind::Parallel,
    labels::PARALLEL,
    parallels,
    |p| Some(p.summary())
);
stored_object!(
    TwoLinesObject,
    ObjectKind::TwoLines,
    labels::TWO_LINES,
    two_lines,
    |t| Some(t.summary())
);
