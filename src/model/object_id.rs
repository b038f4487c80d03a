// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Stable identifiers for committed drawing objects.
//!
//! Each `ObjectId` is a monotonically increasing `u64` taken from a global
//! atomic counter. Undo entries and selection targets refer to objects by
//! id, so deleting one object never shifts the identity of another. Ids are
//! never reused within a process; importing a replicated drawing advances
//! the counter past every id it contains.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A unique identifier for a committed object
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(u64);

static OBJECT_COUNTER: AtomicU64 = AtomicU64::new(1);

impl ObjectId {
    /// Create a new unique object ID
    pub fn next() -> Self {
        Self(OBJECT_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Make sure ids handed out later are greater than `id`
    pub fn observe(id: ObjectId) {
        OBJECT_COUNTER.fetch_max(id.successor(), Ordering::Relaxed);
    }

    /// First raw id after this one; saturates at `u64::MAX`
    fn successor(self) -> u64 {
        self.0.saturating_add(1)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
