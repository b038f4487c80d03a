// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Parallel tool: a line from two clicks, then a distance point

use super::{ClickOutcome, Construction, PointBuffer, PreviewShape, Tool, ToolId};
use crate::model::ParallelObject;
use kurbo::Point;

#[derive(Debug, Clone, Default)]
pub struct ParallelTool {
    buffer: PointBuffer<3>,
}

impl Tool for ParallelTool {
    fn id(&self) -> ToolId {
        ToolId::Parallel
    }

    fn click(&mut self, pos: Point) -> ClickOutcome {
        let Some(points) = self.buffer.push(pos) else {
            return ClickOutcome::Pending;
        };
        self.buffer.clear();
        match ParallelObject::from_points(points) {
            Ok(parallel) => ClickOutcome::Completed(Construction::Parallel(parallel)),
            Err(err) => ClickOutcome::Rejected(err),
        }
    }

    fn pending(&self) -> &[Point] {
        self.buffer.as_slice()
    }

    fn preview(&self, cursor: Point) -> Vec<PreviewShape> {
        match *self.buffer.as_slice() {
            [start] => vec![PreviewShape::Line { start, end: cursor }],
            [a, b] => vec![
                PreviewShape::Line { start: a, end: b },
                PreviewShape::Line {
                    start: cursor,
                    end: cursor + (b - a),
                },
            ],
            _ => Vec::new(),
        }
    }

    fn cancel(&mut self) {
        self.buffer.clear();
    }
}
