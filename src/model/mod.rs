// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Drawing data model

pub mod object_id;
pub mod objects;
pub mod store;

pub use object_id::ObjectId;
pub use objects::{
    CircleObject, ConstructionError, FineCircleObject, LineObject, LineSegmentObject, ObjectKind,
    ParallelObject, PointObject, Stroke, StrokeColor, TwoLinesObject,
};
pub use store::{ObjectStore, StoredObject};
