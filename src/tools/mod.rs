// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Construction tools.
//!
//! Each tool owns a buffer shaped for its arity and turns image-space
//! clicks into finished objects. Tools never touch the object store; the
//! edit session commits whatever a click completes.

mod buffer;
pub mod circle;
pub mod fine_circle;
pub mod line;
pub mod line_segment;
pub mod parallel;
pub mod point;
pub mod two_lines;

pub use buffer::PointBuffer;

use crate::model::{
    CircleObject, ConstructionError, FineCircleObject, LineObject, LineSegmentObject,
    ParallelObject, PointObject, TwoLinesObject,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};

// ===== Tool Identifier =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolId {
    /// No tool armed; clicks select
    #[default]
    Idle,
    Point,
    Line,
    LineSegment,
    /// Circle through three points
    Circle,
    /// Least-squares circle through five points
    FineCircle,
    /// Two parallel lines from three points
    Parallel,
    /// Two independent lines and the angle between them
    TwoLines,
}

// ===== Click results =====

/// A finished object produced by a tool
#[derive(Debug, Clone, PartialEq)]
pub enum Construction {
    Point(PointObject),
    Line(LineObject),
    LineSegment(LineSegmentObject),
    Circle(CircleObject),
    FineCircle(FineCircleObject),
    Parallel(ParallelObject),
    TwoLines(TwoLinesObject),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The point was buffered
    Pending,
    /// The click completed an object; the tool is armed for the next one
    Completed(Construction),
    /// The points did not yield an object; the tool discarded some of them
    Rejected(ConstructionError),
    /// No tool is active
    Ignored,
}

/// Tentative geometry shown while a construction is in progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PreviewShape {
    /// Infinite line, drawn clipped to the image
    Line { start: Point, end: Point },
    Segment { start: Point, end: Point },
    Circle { center: Point, radius: f64 },
}

// ===== Tool Trait =====

pub trait Tool {
    fn id(&self) -> ToolId;

    /// Handle a left click in image coordinates
    fn click(&mut self, pos: Point) -> ClickOutcome;

    /// Points buffered so far
    fn pending(&self) -> &[Point];

    /// Tentative shapes given the cursor position
    fn preview(&self, _cursor: Point) -> Vec<PreviewShape> {
        Vec::new()
    }

    /// Drop the in-progress construction
    fn cancel(&mut self);
}

// ===== ToolBox Enum =====

/// The active tool and its in-progress state
#[derive(Debug, Clone, Default)]
pub enum ToolBox {
    #[default]
    Idle,
    Point(point::PointTool),
    Line(line::LineTool),
    LineSegment(line_segment::LineSegmentTool),
    Circle(circle::CircleTool),
    FineCircle(fine_circle::FineCircleTool),
    Parallel(parallel::ParallelTool),
    TwoLines(two_lines::TwoLinesTool),
}

impl ToolBox {
    /// Create a freshly armed tool by ID
    pub fn for_id(id: ToolId) -> Self {
        match id {
            ToolId::Idle => ToolBox::Idle,
            ToolId::Point => ToolBox::Point(point::PointTool),
            ToolId::Line => ToolBox::Line(line::LineTool::default()),
            ToolId::LineSegment => ToolBox::LineSegment(line_segment::LineSegmentTool::default()),
            ToolId::Circle => ToolBox::Circle(circle::CircleTool::default()),
            ToolId::FineCircle => ToolBox::FineCircle(fine_circle::FineCircleTool::default()),
            ToolId::Parallel => ToolBox::Parallel(parallel::ParallelTool::default()),
            ToolId::TwoLines => ToolBox::TwoLines(two_lines::TwoLinesTool::default()),
        }
    }

    fn as_tool(&self) -> Option<&dyn Tool> {
        match self {
            ToolBox::Idle => None,
            ToolBox::Point(tool) => Some(tool),
            ToolBox::Line(tool) => Some(tool),
            ToolBox::LineSegment(tool) => Some(tool),
            ToolBox::Circle(tool) => Some(tool),
            ToolBox::FineCircle(tool) => Some(tool),
            ToolBox::Parallel(tool) => Some(tool),
            ToolBox::TwoLines(tool) => Some(tool),
        }
    }

    fn as_tool_mut(&mut self) -> Option<&mut dyn Tool> {
        match self {
            ToolBox::Idle => None,
            ToolBox::Point(tool) => Some(tool),
            ToolBox::Line(tool) => Some(tool),
            ToolBox::LineSegment(tool) => Some(tool),
            ToolBox::Circle(tool) => Some(tool),
            ToolBox::FineCircle(tool) => Some(tool),
            ToolBox::Parallel(tool) => Some(tool),
            ToolBox::TwoLines(tool) => Some(tool),
        }
    }

    pub fn id(&self) -> ToolId {
        match self.as_tool() {
            Some(tool) => tool.id(),
            None => ToolId::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ToolBox::Idle)
    }

    pub fn click(&mut self, pos: Point) -> ClickOutcome {
        match self.as_tool_mut() {
            Some(tool) => tool.click(pos),
            None => ClickOutcome::Ignored,
        }
    }

    pub fn pending(&self) -> &[Point] {
        match self.as_tool() {
            Some(tool) => tool.pending(),
            None => &[],
        }
    }

    pub fn preview(&self, cursor: Point) -> Vec<PreviewShape> {
        self.as_tool()
            .map(|tool| tool.preview(cursor))
            .unwrap_or_default()
    }

    pub fn cancel(&mut self) {
        if let Some(tool) = self.as_tool_mut() {
            tool.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_ignores_clicks() {
        let mut tool = ToolBox::default();
        assert_eq!(tool.id(), ToolId::Idle);
        assert_eq!(tool.click(Point::new(1.0, 1.0)), ClickOutcome::Ignored);
        assert!(tool.pending().is_empty());
        assert!(tool.preview(Point::ORIGIN).is_empty());
    }

    #[test]
    fn for_id_round_trips() {
        for id in [
            ToolId::Idle,
            ToolId::Point,
            ToolId::Line,
            ToolId::LineSegment,
            ToolId::Circle,
            ToolId::FineCircle,
            ToolId::Parallel,
            ToolId::TwoLines,
        ] {
            assert_eq!(ToolBox::for_id(id).id(), id);
        }
    }

    #[test]
    fn cancel_clears_pending() {
        let mut tool = ToolBox::for_id(ToolId::TwoLines);
        tool.click(Point::new(1.0, 1.0));
        tool.click(Point::new(2.0, 1.0));
        assert_eq!(tool.pending().len(), 2);
        tool.cancel();
        assert!(tool.pending().is_empty());
        assert_eq!(tool.id(), ToolId::TwoLines);
    }
}
