// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Fixed-capacity buffer of in-progress construction points

use kurbo::Point;

/// Holds up to `N` points; a full buffer yields exactly `[Point; N]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointBuffer<const N: usize> {
    points: [Point; N],
    len: usize,
}

impl<const N: usize> PointBuffer<N> {
    pub fn new() -> Self {
        Self {
            points: [Point::ORIGIN; N],
            len: 0,
        }
    }

    /// Append a point. Returns the completed array when this fills the buffer.
    ///
    /// The buffer keeps its contents after filling; callers decide whether
    /// to [`clear`](Self::clear) or [`pop`](Self::pop).
    pub fn push(&mut self, point: Point) -> Option<[Point; N]> {
        if self.len < N {
            self.points[self.len] = point;
            self.len += 1;
        }
        self.is_full().then_some(self.points)
    }

    pub fn pop(&mut self) -> Option<Point> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.points[self.len])
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points[..self.len]
    }

    pub fn first(&self) -> Option<Point> {
        self.as_slice().first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.as_slice().last().copied()
    }
}

impl<const N: usize> Default for PointBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
