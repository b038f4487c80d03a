// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Notifications an edit session emits for the surrounding application.
//!
//! The session appends events to an outbox; the owner drains them after
//! each operation and forwards them (status bar, replication, persistence).

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A construction or compound measurement produced a result
    MeasurementCompleted { view: String, text: String },
    /// The selection changed; `info` summarises counts per kind
    SelectionChanged { info: String },
    /// An object was committed
    DrawingCompleted { view: String },
    /// Objects were removed or replaced
    DrawingDataChanged { view: String },
}

impl SessionEvent {
    /// Whether the paired view needs a fresh copy of the drawing
    pub fn requires_replication(&self) -> bool {
        matches!(
            self,
            SessionEvent::DrawingCompleted { .. } | SessionEvent::DrawingDataChanged { .. }
        )
    }
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEvent::MeasurementCompleted { view, text } => {
                write!(f, "[{view}] measurement: {text}")
            }
            SessionEvent::SelectionChanged { info } => write!(f, "selection: {info}"),
            SessionEvent::DrawingCompleted { view } => write!(f, "[{view}] drawing completed"),
            SessionEvent::DrawingDataChanged { view } => write!(f, "[{view}] drawing changed"),
        }
    }
}
