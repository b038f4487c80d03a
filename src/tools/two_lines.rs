// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Two-lines tool: two independent lines from four clicks

use super::{ClickOutcome, Construction, PointBuffer, PreviewShape, Tool, ToolId};
use crate::model::TwoLinesObject;
use kurbo::Point;

#[derive(Debug, Clone, Default)]
pub struct TwoLinesTool {
    buffer: PointBuffer<4>,
}

impl Tool for TwoLinesTool {
    fn id(&self) -> ToolId {
        ToolId::TwoLines
    }

    fn click(&mut self, pos: Point) -> ClickOutcome {
        let Some(points) = self.buffer.push(pos) else {
            return ClickOutcome::Pending;
        };
        self.buffer.clear();
        match TwoLinesObject::from_points(points) {
            Ok(two_lines) => ClickOutcome::Completed(Construction::TwoLines(two_lines)),
            Err(err) => ClickOutcome::Rejected(err),
        }
    }

    fn pending(&self) -> &[Point] {
        self.buffer.as_slice()
    }

    fn preview(&self, cursor: Point) -> Vec<PreviewShape> {
        match *self.buffer.as_slice() {
            [start] => vec![PreviewShape::Line { start, end: cursor }],
            [a, b] => vec![PreviewShape::Line { start: a, end: b }],
            [a, b, c] => vec![
                PreviewShape::Line { start: a, end: b },
                PreviewShape::Line {
                    start: c,
                    end: cursor,
                },
            ],
            _ => Vec::new(),
        }
    }

    fn cancel(&mut self) {
        self.buffer.clear();
    }
}
