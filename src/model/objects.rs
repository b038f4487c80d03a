// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Committed drawing primitives.
//!
//! Every object stores its construction points in image space together with
//! the values derived from them at commit time. Objects with a failure mode
//! are built through `from_points`, which runs the geometry kernel and
//! reports a [`ConstructionError`] instead of producing a half-valid object.

use crate::geometry;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use thiserror::Error;

// ===== Kinds and styling =====

/// The seven object collections of a drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Point,
    Line,
    LineSegment,
    Circle,
    FineCircle,
    Parallel,
    TwoLines,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 7] = [
        ObjectKind::Point,
        ObjectKind::Line,
        ObjectKind::LineSegment,
        ObjectKind::Circle,
        ObjectKind::FineCircle,
        ObjectKind::Parallel,
        ObjectKind::TwoLines,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Plural name used in selection summaries
    pub fn plural(self) -> &'static str {
        match self {
            ObjectKind::Point => "Points",
            ObjectKind::Line => "Lines",
            ObjectKind::LineSegment => "Segments",
            ObjectKind::Circle => "Circles",
            ObjectKind::FineCircle => "Fine circles",
            ObjectKind::Parallel => "Parallels",
            ObjectKind::TwoLines => "Two-line pairs",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Point => "point",
            ObjectKind::Line => "line",
            ObjectKind::LineSegment => "line segment",
            ObjectKind::Circle => "circle",
            ObjectKind::FineCircle => "fine circle",
            ObjectKind::Parallel => "parallel",
            ObjectKind::TwoLines => "two lines",
        };
        f.write_str(name)
    }
}

/// Named stroke colours; `theme` maps them to concrete colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrokeColor {
    #[default]
    Green,
    Red,
    Magenta,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: StrokeColor,
    pub thickness: f64,
    pub dashed: bool,
}

impl Stroke {
    pub fn solid(color: StrokeColor) -> Self {
        Self {
            color,
            thickness: crate::settings::stroke::THICKNESS,
            dashed: false,
        }
    }

    pub fn dashed(color: StrokeColor) -> Self {
        Self {
            dashed: true,
            ..Self::solid(color)
        }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::solid(StrokeColor::Green)
    }
}

// ===== Errors =====

/// Why a set of construction points did not yield an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("the three points are collinear")]
    Collinear,
    #[error("the five-point circle fit is singular")]
    SingularFit,
    #[error("the two lines are parallel")]
    ParallelLines,
    #[error("the line's two points coincide")]
    DegenerateLine,
}

// ===== Point =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointObject {
    pub position: Point,
    pub label: String,
    pub visible: bool,
}

impl PointObject {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            label: String::new(),
            visible: true,
        }
    }
}

// ===== Line =====

/// An infinite line through two points, rendered clipped to the image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineObject {
    pub points: [Point; 2],
    pub label: String,
    pub stroke: Stroke,
}

impl LineObject {
    pub fn from_points(points: [Point; 2]) -> Result<Self, ConstructionError> {
        if points[0].distance(points[1]) < geometry::EPSILON {
            return Err(ConstructionError::DegenerateLine);
        }
        Ok(Self {
            points,
            label: String::new(),
            stroke: Stroke::default(),
        })
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[1]
    }

    pub fn angle(&self) -> f64 {
        geometry::line_angle_degrees(self.start(), self.end())
    }

    pub fn summary(&self) -> String {
        format!("Line: angle {:.1}°", self.angle())
    }
}

// ===== Line segment =====

/// A bounded segment, drawn literally between its two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSegmentObject {
    pub points: [Point; 2],
    pub length: f64,
    pub label: String,
    pub stroke: Stroke,
}

impl LineSegmentObject {
    pub fn new(points: [Point; 2]) -> Self {
        Self {
            points,
            length: points[0].distance(points[1]),
            label: String::new(),
            stroke: Stroke::default(),
        }
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Direction angle from the first point to the second, in `[0, 360)`
    pub fn direction_angle(&self) -> f64 {
        geometry::direction_angle_degrees(self.points[0], self.points[1])
    }

    pub fn summary(&self) -> String {
        format!(
            "Segment: length {:.1}, angle {:.1}°",
            self.length,
            self.direction_angle()
        )
    }
}

// ===== Circles =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleObject {
    pub points: [Point; 3],
    pub center: Point,
    pub radius: f64,
    pub label: String,
    pub stroke: Stroke,
}

impl CircleObject {
    pub fn from_points(points: [Point; 3]) -> Result<Self, ConstructionError> {
        let (center, radius) = geometry::circle_from_three_points(points[0], points[1], points[2])
            .ok_or(ConstructionError::Collinear)?;
        Ok(Self {
            points,
            center,
            radius,
            label: String::new(),
            stroke: Stroke::default(),
        })
    }

    pub fn summary(&self) -> String {
        circle_summary("Circle", self.radius)
    }
}

/// A circle fit through five points by least squares
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineCircleObject {
    pub points: [Point; 5],
    pub center: Point,
    pub radius: f64,
    pub label: String,
    pub stroke: Stroke,
}

impl FineCircleObject {
    pub fn from_points(points: [Point; 5]) -> Result<Self, ConstructionError> {
        let (center, radius) =
            geometry::circle_from_five_points(&points).ok_or(ConstructionError::SingularFit)?;
        Ok(Self {
            points,
            center,
            radius,
            label: String::new(),
            stroke: Stroke::default(),
        })
    }

    pub fn summary(&self) -> String {
        circle_summary("Fine circle", self.radius)
    }
}

fn circle_summary(name: &str, radius: f64) -> String {
    let area = PI * radius * radius;
    let circumference = 2.0 * PI * radius;
    format!("{name}: radius {radius:.1}, area {area:.1}, circumference {circumference:.1}")
}

// ===== Parallel =====

/// Two parallel lines and their midline.
///
/// The first line runs through `points[0]` and `points[1]`; the second is
/// the first translated so that it passes through `points[2]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelObject {
    pub points: [Point; 3],
    pub second_line: [Point; 2],
    pub mid_start: Point,
    pub mid_end: Point,
    pub distance: f64,
    pub angle: f64,
    pub label: String,
    pub stroke: Stroke,
}

impl ParallelObject {
    pub fn from_points(points: [Point; 3]) -> Result<Self, ConstructionError> {
        let [p1, p2, p3] = points;
        if p1.distance(p2) < geometry::EPSILON {
            return Err(ConstructionError::DegenerateLine);
        }
        let p4 = p3 + (p2 - p1);
        Ok(Self {
            points,
            second_line: [p3, p4],
            mid_start: p1.midpoint(p3),
            mid_end: p2.midpoint(p4),
            distance: geometry::distance_point_to_line(p3, p1, p2),
            angle: geometry::line_angle_degrees(p1, p2),
            label: String::new(),
            stroke: Stroke::default(),
        })
    }

    pub fn first_line(&self) -> [Point; 2] {
        [self.points[0], self.points[1]]
    }

    pub fn midline(&self) -> (Point, Point) {
        (self.mid_start, self.mid_end)
    }

    pub fn summary(&self) -> String {
        format!(
            "Parallel lines: distance {:.1}, angle {:.1}°",
            self.distance, self.angle
        )
    }
}

// ===== Two lines =====

/// Two independent lines with their intersection and the angle between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoLinesObject {
    pub points: [Point; 4],
    pub intersection: Point,
    pub angle: f64,
    pub label: String,
    pub stroke: Stroke,
}

impl TwoLinesObject {
    pub fn from_points(points: [Point; 4]) -> Result<Self, ConstructionError> {
        let [p1, p2, p3, p4] = points;
        let intersection =
            geometry::line_intersection(p1, p2, p3, p4).ok_or(ConstructionError::ParallelLines)?;
        Ok(Self {
            points,
            intersection,
            angle: geometry::angle_between_lines(p1, p2, p3, p4),
            label: String::new(),
            stroke: Stroke::default(),
        })
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn first_line(&self) -> [Point; 2] {
        [self.points[0], self.points[1]]
    }

    pub fn second_line(&self) -> [Point; 2] {
        [self.points[2], self.points[3]]
    }

    pub fn bisector(&self) -> Option<(Point, Point)> {
        let [p1, p2, p3, p4] = self.points;
        geometry::angle_bisector(p1, p2, p3, p4, self.intersection)
    }

    pub fn summary(&self) -> String {
        format!("Two lines angle: {:.1}°", self.angle)
    }
}
