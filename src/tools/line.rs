// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Line tool: two clicks define an infinite line

use super::{ClickOutcome, Construction, PointBuffer, PreviewShape, Tool, ToolId};
use crate::model::LineObject;
use kurbo::Point;

#[derive(Debug, Clone, Default)]
pub struct LineTool {
    buffer: PointBuffer<2>,
}

impl Tool for LineTool {
    fn id(&self) -> ToolId {
        ToolId::Line
    }

    fn click(&mut self, pos: Point) -> ClickOutcome {
        let Some(points) = self.buffer.push(pos) else {
            return ClickOutcome::Pending;
        };
        match LineObject::from_points(points) {
            Ok(line) => {
                self.buffer.clear();
                ClickOutcome::Completed(Construction::Line(line))
            }
            Err(err) => {
                // keep the first point; wait for a distinct second one
                self.buffer.pop();
                ClickOutcome::Rejected(err)
            }
        }
    }

    fn pending(&self) -> &[Point] {
        self.buffer.as_slice()
    }

    fn preview(&self, cursor: Point) -> Vec<PreviewShape> {
        match self.buffer.first() {
            Some(start) if start != cursor => vec![PreviewShape::Line { start, end: cursor }],
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
    fn second_click_completes_and_rearms() {
        let mut tool = LineTool::default();
        assert_eq!(tool.click(Point::new(0.0, 0.0)), ClickOutcome::Pending);
        assert!(matches!(
            tool.click(Point::new(10.0, 0.0)),
            ClickOutcome::Completed(Construction::Line(_))
        ));
        assert!(tool.pending().is_empty());
        assert_eq!(tool.click(Point::new(5.0, 5.0)), ClickOutcome::Pending);
    }

    #[test]
    fn coincident_second_point_is_rejected() {
        let mut tool = LineTool::default();
        tool.click(Point::new(3.0, 3.0));
        assert_eq!(
            tool.click(Point::new(3.0, 3.0)),
            ClickOutcome::Rejected(ConstructionError::DegenerateLine)
        );
        assert_eq!(tool.pending(), &[Point::new(3.0, 3.0)]);
    }

    #[test]
    fn preview_follows_cursor() {
        let mut tool = LineTool::default();
        assert!(tool.preview(Point::new(1.0, 1.0)).is_empty());
        tool.click(Point::ORIGIN);
        assert_eq!(
            tool.preview(Point::new(4.0, 2.0)),
            vec![PreviewShape::Line {
                start: Point::ORIGIN,
                end: Point::new(4.0, 2.0)
            }]
        );
    }
}
