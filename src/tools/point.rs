// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Point tool: every click commits a point

use super::{ClickOutcome, Construction, Tool, ToolId};
use crate::model::PointObject;
use kurbo::Point;

#[derive(Debug, Clone, Copy, Default)]
pub struct PointTool;

impl Tool for PointTool {
    fn id(&self) -> ToolId {
        ToolId::Point
    }

    fn click(&mut self, pos: Point) -> ClickOutcome {
        ClickOutcome::Completed(Construction::Point(PointObject::new(pos)))
    }

    fn pending(&self) -> &[Point] {
        &[]
    }

    fn cancel(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_click_completes() {
        let mut tool = PointTool;
        for i in 0..3 {
            let pos = Point::new(i as f64, 1.0);
            match tool.click(pos) {
                ClickOutcome::Completed(Construction::Point(p)) => assert_eq!(p.position, pos),
                other => panic!("unexpected outcome {other:?}"),
            }
        }
    }
}
