// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Compound measurements between selected objects

use super::EditSession;
use crate::editing::events::SessionEvent;
use crate::geometry;
use crate::model::{
    CircleObject, FineCircleObject, LineObject, LineSegmentObject, ObjectId, ObjectKind,
    ParallelObject, PointObject, Stroke, StrokeColor, TwoLinesObject,
};
use kurbo::Point;
use serde::Deserialize;
use thiserror::Error;

/// A measurement that combines two selected objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    PointToLine,
    PointToCircle,
    PointToFineCircle,
    LineToCircle,
    LineToFineCircle,
    SegmentAngle,
    TwoLinesAngle,
    PointToMidline,
    PointToBisector,
}

impl MeasurementKind {
    pub const ALL: [MeasurementKind; 9] = [
        MeasurementKind::PointToLine,
        MeasurementKind::PointToCircle,
        MeasurementKind::PointToFineCircle,
        MeasurementKind::LineToCircle,
        MeasurementKind::LineToFineCircle,
        MeasurementKind::SegmentAngle,
        MeasurementKind::TwoLinesAngle,
        MeasurementKind::PointToMidline,
        MeasurementKind::PointToBisector,
    ];

    /// What the selection must contain, for error messages
    pub fn needs(self) -> &'static str {
        match self {
            MeasurementKind::PointToLine => "one point and one line",
            MeasurementKind::PointToCircle => "one point and one circle",
            MeasurementKind::PointToFineCircle => "one point and one fine circle",
            MeasurementKind::LineToCircle => "one line and one circle",
            MeasurementKind::LineToFineCircle => "one line and one fine circle",
            MeasurementKind::SegmentAngle => "two line segments",
            MeasurementKind::TwoLinesAngle => "two lines",
            MeasurementKind::PointToMidline => "one point and one parallel midline",
            MeasurementKind::PointToBisector => "one point and one angle bisector",
        }
    }

    /// Selection shape this measurement needs: objects per kind, midlines,
    /// bisectors
    fn requirement(self) -> Requirement {
        use ObjectKind as K;
        let (objects, midlines, bisectors): (&[(ObjectKind, usize)], usize, usize) = match self {
            MeasurementKind::PointToLine => (&[(K::Point, 1), (K::Line, 1)], 0, 0),
            MeasurementKind::PointToCircle => (&[(K::Point, 1), (K::Circle, 1)], 0, 0),
            MeasurementKind::PointToFineCircle => (&[(K::Point, 1), (K::FineCircle, 1)], 0, 0),
            MeasurementKind::LineToCircle => (&[(K::Line, 1), (K::Circle, 1)], 0, 0),
            MeasurementKind::LineToFineCircle => (&[(K::Line, 1), (K::FineCircle, 1)], 0, 0),
            MeasurementKind::SegmentAngle => (&[(K::LineSegment, 2)], 0, 0),
            MeasurementKind::TwoLinesAngle => (&[(K::Line, 2)], 0, 0),
            MeasurementKind::PointToMidline => (&[(K::Point, 1)], 1, 0),
            MeasurementKind::PointToBisector => (&[(K::Point, 1)], 0, 1),
        };
        Requirement {
            objects,
            midlines,
            bisectors,
        }
    }
}

struct Requirement {
    objects: &'static [(ObjectKind, usize)],
    midlines: usize,
    bisectors: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasurementError {
    #[error("selection does not fit: need {0}")]
    SelectionMismatch(&'static str),
    #[error("selected {0} {1} no longer exists")]
    MissingObject(ObjectKind, ObjectId),
    #[error("measurement is undefined: {0}")]
    Degenerate(&'static str),
}

impl EditSession {
    /// Measurements the current selection supports
    pub fn available_measurements(&self) -> Vec<MeasurementKind> {
        MeasurementKind::ALL
            .into_iter()
            .filter(|kind| self.selection_fits(*kind))
            .collect()
    }

    fn selection_fits(&self, kind: MeasurementKind) -> bool {
        let req = kind.requirement();
        let wanted: usize = req.objects.iter().map(|(_, n)| n).sum::<usize>()
            + req.midlines
            + req.bisectors;
        self.selection.len() == wanted
            && req
                .objects
                .iter()
                .all(|(k, n)| self.selection.count_of(*k) == *n)
            && self.selection.midlines().len() == req.midlines
            && self.selection.bisectors().len() == req.bisectors
    }

    /// Run `kind` on the current selection.
    ///
    /// Returns the measurement text. Results that carry geometry are
    /// committed as objects with their own undo entry. The selection is
    /// cleared afterwards.
    pub fn perform_measurement(&mut self, kind: MeasurementKind) -> Result<String, MeasurementError> {
        if !self.selection_fits(kind) {
            return Err(MeasurementError::SelectionMismatch(kind.needs()));
        }
        let before = self.store.len();

        let text = match kind {
            MeasurementKind::PointToLine => {
                let p = self.selected_point()?;
                let line = self.selected::<LineObject>(ObjectKind::Line, 0)?;
                self.perpendicular_to(p, line.start(), line.end(), "Point to line distance")
            }
            MeasurementKind::PointToCircle => {
                let p = self.selected_point()?;
                let c = self.selected::<CircleObject>(ObjectKind::Circle, 0)?;
                self.point_to_circle(p, c.center, c.radius, "Point to circle distance")?
            }
            MeasurementKind::PointToFineCircle => {
                let p = self.selected_point()?;
                let c = self.selected::<FineCircleObject>(ObjectKind::FineCircle, 0)?;
                self.point_to_circle(p, c.center, c.radius, "Point to fine circle distance")?
            }
            MeasurementKind::LineToCircle => {
                let line = self.selected::<LineObject>(ObjectKind::Line, 0)?;
                let c = self.selected::<CircleObject>(ObjectKind::Circle, 0)?;
                self.line_to_circle(&line, c.center, c.radius)?
            }
            MeasurementKind::LineToFineCircle => {
                let line = self.selected::<LineObject>(ObjectKind::Line, 0)?;
                let c = self.selected::<FineCircleObject>(ObjectKind::FineCircle, 0)?;
                self.line_to_circle(&line, c.center, c.radius)?
            }
            MeasurementKind::SegmentAngle => {
                let a = self.selected::<LineSegmentObject>(ObjectKind::LineSegment, 0)?;
                let b = self.selected::<LineSegmentObject>(ObjectKind::LineSegment, 1)?;
                let angle =
                    geometry::acute_angle_between(a.points[0], a.points[1], b.points[0], b.points[1]);
                let text = format!("Segment angle: {angle:.2}°");
                self.emit_measurement(text.clone());
                text
            }
            MeasurementKind::TwoLinesAngle => {
                let a = self.selected::<LineObject>(ObjectKind::Line, 0)?;
                let b = self.selected::<LineObject>(ObjectKind::Line, 1)?;
                self.two_lines_angle(&a, &b)
            }
            MeasurementKind::PointToMidline => {
                let p = self.selected_point()?;
                let id = self.selection.midlines()[0];
                let par = self
                    .store
                    .get::<ParallelObject>(id)
                    .ok_or(MeasurementError::MissingObject(ObjectKind::Parallel, id))?;
                let (a, b) = par.midline();
                self.perpendicular_to(p, a, b, "Point to midline distance")
            }
            MeasurementKind::PointToBisector => {
                let p = self.selected_point()?;
                let id = self.selection.bisectors()[0];
                let tl = self
                    .store
                    .get::<TwoLinesObject>(id)
                    .ok_or(MeasurementError::MissingObject(ObjectKind::TwoLines, id))?;
                let (a, b) = tl
                    .bisector()
                    .ok_or(MeasurementError::Degenerate("the lines have no bisector"))?;
                self.perpendicular_to(p, a, b, "Point to bisector distance")
            }
        };

        tracing::info!("[{}] {kind:?}: {text}", self.view_name);
        self.clear_selection();
        if self.store.len() != before {
            self.emit_data_changed();
        }
        Ok(text)
    }

    /// Build a segment between exactly two selected points
    pub fn create_segment_from_selected_points(&mut self) -> Result<ObjectId, MeasurementError> {
        let ids = self.selection.ids_of(ObjectKind::Point);
        if ids.len() != 2 || self.selection.len() != 2 {
            return Err(MeasurementError::SelectionMismatch("exactly two points"));
        }
        let a = self.point_position(ids[0])?;
        let b = self.point_position(ids[1])?;
        let segment = LineSegmentObject::new([a, b]);
        let label = format!(
            "Length: {:.1}, angle: {:.1}°",
            segment.length,
            segment.direction_angle()
        );
        let id = self.commit(segment.with_label(label));
        self.clear_selection();
        self.emit_data_changed();
        Ok(id)
    }

    // ===== Helpers =====

    fn point_position(&self, id: ObjectId) -> Result<Point, MeasurementError> {
        self.store
            .get::<PointObject>(id)
            .map(|p| p.position)
            .ok_or(MeasurementError::MissingObject(ObjectKind::Point, id))
    }

    fn selected_point(&self) -> Result<Point, MeasurementError> {
        let id = self.selection.ids_of(ObjectKind::Point)[0];
        self.point_position(id)
    }

    fn selected<T: crate::model::StoredObject>(
        &self,
        kind: ObjectKind,
        nth: usize,
    ) -> Result<T, MeasurementError> {
        let id = self.selection.ids_of(kind)[nth];
        self.store
            .get::<T>(id)
            .cloned()
            .ok_or(MeasurementError::MissingObject(kind, id))
    }

    fn emit_measurement(&mut self, text: String) {
        self.emit(SessionEvent::MeasurementCompleted {
            view: self.view_name.clone(),
            text,
        });
    }

    /// Commit a dashed red perpendicular from `p` to the line `ab`
    fn perpendicular_to(&mut self, p: Point, a: Point, b: Point, what: &str) -> String {
        let foot = geometry::perpendicular_foot(p, a, b);
        let distance = geometry::distance_point_to_line(p, a, b);
        self.commit_measurement_segment(p, foot, StrokeColor::Red, distance);
        let text = format!("{what}: {distance:.2} px");
        self.emit_measurement(text.clone());
        text
    }

    fn point_to_circle(
        &mut self,
        p: Point,
        center: Point,
        radius: f64,
        what: &str,
    ) -> Result<String, MeasurementError> {
        let v = p - center;
        let len = v.hypot();
        if len < geometry::EPSILON {
            return Err(MeasurementError::Degenerate("the point is the circle's centre"));
        }
        let nearest = center + v * (radius / len);
        let distance = geometry::distance_point_to_circle(p, center, radius);
        self.commit_measurement_segment(p, nearest, StrokeColor::Red, distance);
        let text = format!("{what}: {distance:.2} px");
        self.emit_measurement(text.clone());
        Ok(text)
    }

    fn line_to_circle(
        &mut self,
        line: &LineObject,
        center: Point,
        radius: f64,
    ) -> Result<String, MeasurementError> {
        let foot = geometry::perpendicular_foot(center, line.start(), line.end());
        let v = foot - center;
        let len = v.hypot();
        if len < geometry::EPSILON {
            return Err(MeasurementError::Degenerate("the line passes through the centre"));
        }
        let rim = center + v * (radius / len);
        let to_center = geometry::distance_point_to_line(center, line.start(), line.end());
        let gap = (to_center - radius).abs();
        self.commit_measurement_segment(foot, rim, StrokeColor::Magenta, gap);

        let relation = geometry::line_circle_relation(line.start(), line.end(), center, radius);
        let text = format!(
            "Line {} circle\nCentre to line distance: {to_center:.2} px\nCircle radius: {radius:.2} px",
            relation.describe()
        );
        self.emit_measurement(text.clone());
        Ok(text)
    }

    fn two_lines_angle(&mut self, a: &LineObject, b: &LineObject) -> String {
        let points = [a.start(), a.end(), b.start(), b.end()];
        let Ok(mut two_lines) = TwoLinesObject::from_points(points) else {
            let text = "Lines are parallel".to_string();
            self.emit_measurement(text.clone());
            return text;
        };
        two_lines.angle = geometry::acute_angle_between(points[0], points[1], points[2], points[3]);
        two_lines.label = format!("Angle: {:.1}°", two_lines.angle);
        let text = format!(
            "Two lines angle: {:.1}°\nIntersection: ({:.1}, {:.1})",
            two_lines.angle, two_lines.intersection.x, two_lines.intersection.y
        );
        self.commit_with(
            two_lines.with_stroke(Stroke::solid(StrokeColor::Blue)),
            Some(text.clone()),
        );
        text
    }

    fn commit_measurement_segment(&mut self, from: Point, to: Point, color: StrokeColor, value: f64) {
        let segment = LineSegmentObject::new([from, to])
            .with_stroke(Stroke::dashed(color))
            .with_label(format!("Distance: {value:.2}"));
        self.commit_with(segment, None);
    }
}
