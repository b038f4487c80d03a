// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Circle tool: the circumcircle of three clicks

use super::{ClickOutcome, Construction, PointBuffer, PreviewShape, Tool, ToolId};
use crate::geometry;
use crate::model::CircleObject;
use kurbo::Point;

#[derive(Debug, Clone, Default)]
pub struct CircleTool {
    buffer: PointBuffer<3>,
}

impl Tool for CircleTool {
    fn id(&self) -> ToolId {
        ToolId::Circle
    }

    fn click(&mut self, pos: Point) -> ClickOutcome {
        let Some(points) = self.buffer.push(pos) else {
            return ClickOutcome::Pending;
        };
        match CircleObject::from_points(points) {
            Ok(circle) => {
                self.buffer.clear();
                ClickOutcome::Completed(Construction::Circle(circle))
            }
            Err(err) => {
                // drop the third point and wait for a replacement
                self.buffer.pop();
                ClickOutcome::Rejected(err)
            }
        }
    }

    fn pending(&self) -> &[Point] {
        self.buffer.as_slice()
    }

    fn preview(&self, cursor: Point) -> Vec<PreviewShape> {
        match *self.buffer.as_slice() {
            [start] => vec![PreviewShape::Segment { start, end: cursor }],
            [a, b] => geometry::circle_from_three_points(a, b, cursor)
                .map(|(center, radius)| PreviewShape::Circle { center, radius })
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }

    fn cancel(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConstructionError;

    #[test]
    fn three_clicks_complete() {
        let mut tool = CircleTool::default();
        tool.click(Point::new(0.0, 0.0));
        tool.click(Point::new(0.0, 2.0));
        match tool.click(Point::new(2.0, 0.0)) {
            ClickOutcome::Completed(Construction::Circle(c)) => {
                assert!((c.center - Point::new(1.0, 1.0)).hypot() < 1e-9);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(tool.pending().is_empty());
    }

    #[test]
    fn collinear_third_point_is_replaced() {
        let mut tool = CircleTool::default();
        tool.click(Point::new(0.0, 0.0));
        tool.click(Point::new(1.0, 1.0));
        assert_eq!(
            tool.click(Point::new(2.0, 2.0)),
            ClickOutcome::Rejected(ConstructionError::Collinear)
        );
        assert_eq!(tool.pending().len(), 2);
        assert!(matches!(
            tool.click(Point::new(2.0, 0.0)),
            ClickOutcome::Completed(Construction::Circle(_))
        ));
    }

    #[test]
    fn preview_after_two_points_is_a_circle() {
        let mut tool = CircleTool::default();
        tool.click(Point::new(-1.0, 0.0));
        tool.click(Point::new(1.0, 0.0));
        let preview = tool.preview(Point::new(0.0, 1.0));
        assert!(matches!(preview.as_slice(), [PreviewShape::Circle { .. }]));
    }
}
