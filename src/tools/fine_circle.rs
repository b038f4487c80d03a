// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Fine circle tool: a least-squares circle through five clicks

use super::{ClickOutcome, Construction, PointBuffer, PreviewShape, Tool, ToolId};
use crate::geometry;
use crate::model::FineCircleObject;
use kurbo::Point;

#[derive(Debug, Clone, Default)]
pub struct FineCircleTool {
    buffer: PointBuffer<5>,
}

impl Tool for FineCircleTool {
    fn id(&self) -> ToolId {
        ToolId::FineCircle
    }

    fn click(&mut self, pos: Point) -> ClickOutcome {
        let Some(points) = self.buffer.push(pos) else {
            return ClickOutcome::Pending;
        };
        match FineCircleObject::from_points(points) {
            Ok(circle) => {
                self.buffer.clear();
                ClickOutcome::Completed(Construction::FineCircle(circle))
            }
            Err(err) => {
                self.buffer.pop();
                ClickOutcome::Rejected(err)
            }
        }
    }

    fn pending(&self) -> &[Point] {
        self.buffer.as_slice()
    }

    fn preview(&self, cursor: Point) -> Vec<PreviewShape> {
        let circle = match *self.buffer.as_slice() {
            [a, b, c, d] => geometry::circle_from_five_points(&[a, b, c, d, cursor]),
            [first, .., last] => geometry::circle_from_three_points(first, last, cursor),
            _ => None,
        };
        circle
            .map(|(center, radius)| PreviewShape::Circle { center, radius })
            .into_iter()
            .collect()
    }

    fn cancel(&mut self) {
        self.buffer.clear();
    }
}
