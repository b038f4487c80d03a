// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Line segment tool: two clicks define a bounded segment

use super::{ClickOutcome, Construction, PointBuffer, PreviewShape, Tool, ToolId};
use crate::model::LineSegmentObject;
use kurbo::Point;

#[derive(Debug, Clone, Default)]
pub struct LineSegmentTool {
    buffer: PointBuffer<2>,
}

impl Tool for LineSegmentTool {
    fn id(&self) -> ToolId {
        ToolId::LineSegment
    }

    fn click(&mut self, pos: Point) -> ClickOutcome {
        match self.buffer.push(pos) {
            Some(points) => {
                self.buffer.clear();
                ClickOutcome::Completed(Construction::LineSegment(LineSegmentObject::new(points)))
            }
            None => ClickOutcome::Pending,
        }
    }

    fn pending(&self) -> &[Point] {
        self.buffer.as_slice()
    }

    fn preview(&self, cursor: Point) -> Vec<PreviewShape> {
        self.buffer
            .first()
            .map(|start| PreviewShape::Segment { start, end: cursor })
            .into_iter()
            .collect()
    }

    fn cancel(&mut self) {
        self.buffer.clear();
    }
}
