// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Geometry kernel: pure construction and measurement functions.
//!
//! Everything here works in image space and is side-effect free. Failure
//! to construct (collinear points, a singular fit, parallel lines) is an
//! ordinary `None`, never a panic. Callers are expected to pass finite
//! coordinates.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Threshold for determinants and signed areas
pub const EPSILON: f64 = 1e-10;

/// Threshold below which a direction component counts as zero
const DIRECTION_EPSILON: f64 = 1e-6;

/// Band around the radius inside which a line is reported as tangent
const TANGENT_EPSILON: f64 = 1e-6;

/// Half-length of the bisector representation, in image units
const BISECTOR_HALF_LENGTH: f64 = 5000.0;

// ===== Circles =====

/// Circumcircle of three points.
///
/// Returns `None` when the signed area of the triangle vanishes, i.e. the
/// points are collinear (or coincide).
pub fn circle_from_three_points(p1: Point, p2: Point, p3: Point) -> Option<(Point, f64)> {
    let (x1, y1) = (p1.x, p1.y);
    let (x2, y2) = (p2.x, p2.y);
    let (x3, y3) = (p3.x, p3.y);

    let a = x1 * (y2 - y3) + x2 * (y3 - y1) + x3 * (y1 - y2);
    if a.abs() < EPSILON {
        return None;
    }

    let s1 = x1 * x1 + y1 * y1;
    let s2 = x2 * x2 + y2 * y2;
    let s3 = x3 * x3 + y3 * y3;

    let bx = -(y1 * (s2 - s3) + y2 * (s3 - s1) + y3 * (s1 - s2));
    let by = x1 * (s2 - s3) + x2 * (s3 - s1) + x3 * (s1 - s2);

    let center = Point::new(bx / (2.0 * a), by / (2.0 * a));
    let radius = center.distance(p1);
    Some((center, radius))
}

/// Least-squares circle through five points.
///
/// Fits `x² + y² + A·x + B·y + C = 0` by solving the 3×3 normal equations
/// with Cramer's rule. Returns `None` when the system is singular.
pub fn circle_from_five_points(points: &[Point; 5]) -> Option<(Point, f64)> {
    let mut sx = 0.0;
    let mut sy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    let mut sxxx = 0.0;
    let mut syyy = 0.0;
    let mut sxxy = 0.0;
    let mut sxyy = 0.0;

    for p in points {
        let (x, y) = (p.x, p.y);
        sx += x;
        sy += y;
        sxx += x * x;
        syy += y * y;
        sxy += x * y;
        sxxx += x * x * x;
        syyy += y * y * y;
        sxxy += x * x * y;
        sxyy += x * y * y;
    }
    let n = points.len() as f64;

    let m = [[sxx, sxy, sx], [sxy, syy, sy], [sx, sy, n]];
    let v = [-(sxxx + sxyy), -(sxxy + syyy), -(sxx + syy)];

    let det = det3(m);
    if det.abs() < EPSILON {
        return None;
    }

    let a = det3(replace_column(m, 0, v)) / det;
    let b = det3(replace_column(m, 1, v)) / det;
    let c = det3(replace_column(m, 2, v)) / det;

    let center = Point::new(-a / 2.0, -b / 2.0);
    let radicand = (a * a + b * b) / 4.0 - c;
    let radius = if radicand > 0.0 {
        radicand.sqrt()
    } else {
        points.iter().map(|p| p.distance(center)).sum::<f64>() / n
    };
    Some((center, radius))
}

fn det3(m: [[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

fn replace_column(mut m: [[f64; 3]; 3], col: usize, v: [f64; 3]) -> [[f64; 3]; 3] {
    for (row, value) in m.iter_mut().zip(v) {
        row[col] = value;
    }
    m
}

// ===== Lines =====

/// Intersection of the infinite lines `p1p2` and `p3p4`.
///
/// Returns `None` when the lines are parallel (or either is degenerate).
pub fn line_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if denom.abs() < EPSILON {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / denom;
    Some(p1.lerp(p2, t))
}

/// Extend the line through `p1` and `p2` to the image rectangle.
///
/// A zero-length direction, an empty image or a line that misses the image
/// returns the input unchanged.
pub fn extend_to_image_bounds(p1: Point, p2: Point, image_size: Size) -> (Point, Point) {
    clip_to_image_bounds(p1, p2, image_size).unwrap_or((p1, p2))
}

/// Clip the infinite line through `p1` and `p2` to the image rectangle.
///
/// The line is parametrised as `p1 + t·(p2 − p1)`; `t` is narrowed by each
/// pair of axis-aligned edges. Returns `None` when the line misses
/// `[0, width] × [0, height]`. A zero-length direction or an empty image
/// yields the input unchanged.
pub fn clip_to_image_bounds(p1: Point, p2: Point, image_size: Size) -> Option<(Point, Point)> {
    if image_size.width <= 0.0 || image_size.height <= 0.0 {
        return Some((p1, p2));
    }

    let d = p2 - p1;
    let x_moves = d.x.abs() > DIRECTION_EPSILON;
    let y_moves = d.y.abs() > DIRECTION_EPSILON;
    if !x_moves && !y_moves {
        return Some((p1, p2));
    }

    let mut t_min = f64::NEG_INFINITY;
    let mut t_max = f64::INFINITY;

    if x_moves {
        let t_left = -p1.x / d.x;
        let t_right = (image_size.width - p1.x) / d.x;
        t_min = t_min.max(t_left.min(t_right));
        t_max = t_max.min(t_left.max(t_right));
    } else if !(0.0..=image_size.width).contains(&p1.x) {
        return None;
    }
    if y_moves {
        let t_top = -p1.y / d.y;
        let t_bottom = (image_size.height - p1.y) / d.y;
        t_min = t_min.max(t_top.min(t_bottom));
        t_max = t_max.min(t_top.max(t_bottom));
    } else if !(0.0..=image_size.height).contains(&p1.y) {
        return None;
    }

    if t_min > t_max {
        return None;
    }

    // clamp away rounding at the edges
    let clamp = |p: Point| {
        Point::new(
            p.x.clamp(0.0, image_size.width),
            p.y.clamp(0.0, image_size.height),
        )
    };
    Some((clamp(p1 + d * t_min), clamp(p1 + d * t_max)))
}

/// Undirected angle of a line in degrees, in `[0, 180)`.
pub fn line_angle_degrees(start: Point, end: Point) -> f64 {
    let d = end - start;
    let mut angle = d.y.atan2(d.x).to_degrees();
    if angle < 0.0 {
        angle += 180.0;
    }
    // atan2 of a direction pointing exactly along -x yields 180
    if angle >= 180.0 {
        angle -= 180.0;
    }
    angle
}

/// Angle between two undirected lines given by their individual angles,
/// in `[0, 180)`.
pub fn angle_between_lines(p1: Point, p2: Point, p3: Point, p4: Point) -> f64 {
    let diff = (line_angle_degrees(p1, p2) - line_angle_degrees(p3, p4)).abs();
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Perpendicular distance from `point` to the infinite line through `a`
/// and `b`. A degenerate line falls back to the distance to `a`.
pub fn distance_point_to_line(point: Point, a: Point, b: Point) -> f64 {
    let ca = b.y - a.y;
    let cb = a.x - b.x;
    let cc = b.x * a.y - a.x * b.y;
    let norm = ca.hypot(cb);
    if norm < EPSILON {
        return point.distance(a);
    }
    (ca * point.x + cb * point.y + cc).abs() / norm
}

// ===== Supplementary helpers =====

/// Foot of the perpendicular from `point` onto the line through `a` and `b`.
pub fn perpendicular_foot(point: Point, a: Point, b: Point) -> Point {
    let line = b - a;
    let len2 = line.hypot2();
    if len2 < DIRECTION_EPSILON {
        return a;
    }
    let t = (point - a).dot(line) / len2;
    a + line * t
}

/// Distance from a point to a circle's circumference.
pub fn distance_point_to_circle(point: Point, center: Point, radius: f64) -> f64 {
    (point.distance(center) - radius).abs()
}

/// Whether `point` lies within `tolerance` of the bounded segment `ab`.
pub fn is_point_on_segment(point: Point, a: Point, b: Point, tolerance: f64) -> bool {
    let line = b - a;
    let len2 = line.hypot2();
    if len2 < DIRECTION_EPSILON {
        return point.distance(a) <= tolerance;
    }
    if distance_point_to_line(point, a, b) > tolerance {
        return false;
    }
    let t = (point - a).dot(line) / len2;
    (0.0..=1.0).contains(&t)
}

/// Acute angle between the directions `a1→a2` and `b1→b2`, in `[0, 90]`.
pub fn acute_angle_between(a1: Point, a2: Point, b1: Point, b2: Point) -> f64 {
    let u = a2 - a1;
    let v = b2 - b1;
    let (lu, lv) = (u.hypot(), v.hypot());
    if lu < DIRECTION_EPSILON || lv < DIRECTION_EPSILON {
        return 0.0;
    }
    let cos = (u.dot(v) / (lu * lv)).clamp(-1.0, 1.0);
    let angle = cos.acos().to_degrees();
    if angle > 90.0 { 180.0 - angle } else { angle }
}

/// Direction angle of `start→end` in degrees, in `[0, 360)`.
pub fn direction_angle_degrees(start: Point, end: Point) -> f64 {
    let d = end - start;
    let angle = d.y.atan2(d.x).to_degrees();
    if angle < 0.0 { angle + 360.0 } else { angle }
}

/// How an infinite line sits relative to a circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCircleRelation {
    Intersecting,
    Tangent,
    Separate,
}

impl LineCircleRelation {
    pub fn describe(self) -> &'static str {
        match self {
            LineCircleRelation::Intersecting => "intersects",
            LineCircleRelation::Tangent => "is tangent to",
            LineCircleRelation::Separate => "is separate from",
        }
    }
}

/// Classify the line through `a` and `b` against a circle.
pub fn line_circle_relation(a: Point, b: Point, center: Point, radius: f64) -> LineCircleRelation {
    let d = distance_point_to_line(center, a, b);
    if d < radius - TANGENT_EPSILON {
        LineCircleRelation::Intersecting
    } else if d > radius + TANGENT_EPSILON {
        LineCircleRelation::Separate
    } else {
        LineCircleRelation::Tangent
    }
}

/// Bisector of the lines `p1p2` and `p3p4` through their intersection.
///
/// The bisector follows the sum of the two unit directions, so it halves
/// the angle reported by [`angle_between_lines`] for lines drawn in the
/// same general direction. Returns `None` when the directions cancel out.
pub fn angle_bisector(
    p1: Point,
    p2: Point,
    p3: Point,
    p4: Point,
    intersection: Point,
) -> Option<(Point, Point)> {
    let unit = |v: Vec2| {
        let len = v.hypot();
        if len > 0.0 { v / len } else { v }
    };
    let dir = unit(p2 - p1) + unit(p4 - p3);
    let len = dir.hypot();
    if len < EPSILON {
        return None;
    }
    let dir = dir / len * BISECTOR_HALF_LENGTH;
    Some((intersection - dir, intersection + dir))
}
