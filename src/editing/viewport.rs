// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Mapping between widget (screen) pixels and image pixels.
//!
//! The display layer owns pan and zoom; it pushes the resulting offset,
//! scale and image size in through [`ViewPort::set_transform`]. The
//! viewport keeps no history.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewPort {
    /// Screen position of the image origin
    pub offset: Vec2,
    /// Screen pixels per image pixel; callers keep it positive
    pub scale: f64,
    pub image_size: Size,
}

impl ViewPort {
    pub fn new(offset: Vec2, scale: f64, image_size: Size) -> Self {
        Self {
            offset,
            scale,
            image_size,
        }
    }

    pub fn set_transform(&mut self, offset: Vec2, scale: f64, image_size: Size) {
        if scale <= 0.0 {
            tracing::warn!("Ignoring non-positive viewport scale {scale}");
            return;
        }
        self.offset = offset;
        self.scale = scale;
        self.image_size = image_size;
    }

    /// Convert screen coordinates to image coordinates
    pub fn to_image(&self, screen: Point) -> Point {
        ((screen.to_vec2() - self.offset) / self.scale).to_point()
    }

    /// Convert image coordinates to screen coordinates
    pub fn to_screen(&self, image: Point) -> Point {
        (image.to_vec2() * self.scale + self.offset).to_point()
    }

    /// Convert a screen-space length to image units
    pub fn screen_to_image_distance(&self, px: f64) -> f64 {
        px / self.scale
    }

    /// Whether `image` lies on the pixel grid, `[0, w) × [0, h)`
    pub fn contains_image_point(&self, image: Point) -> bool {
        image.x >= 0.0
            && image.y >= 0.0
            && image.x < self.image_size.width
            && image.y < self.image_size.height
    }
}

impl Default for ViewPort {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            image_size: Size::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_through_screen() {
        let vp = ViewPort::new(Vec2::new(40.0, -12.0), 2.5, Size::new(640.0, 480.0));
        let image = Point::new(123.0, 45.5);
        let screen = vp.to_screen(image);
        assert_eq!(screen, Point::new(40.0 + 123.0 * 2.5, -12.0 + 45.5 * 2.5));
        let back = vp.to_image(screen);
        assert!((back - image).hypot() < 1e-9);
    }

    #[test]
    fn bounds_are_half_open() {
        let vp = ViewPort::new(Vec2::ZERO, 1.0, Size::new(10.0, 5.0));
        assert!(vp.contains_image_point(Point::new(0.0, 0.0)));
        assert!(vp.contains_image_point(Point::new(9.9, 4.9)));
        assert!(!vp.contains_image_point(Point::new(10.0, 1.0)));
        assert!(!vp.contains_image_point(Point::new(1.0, -0.1)));
    }

    #[test]
    fn empty_image_contains_nothing() {
        let vp = ViewPort::default();
        assert!(!vp.contains_image_point(Point::ORIGIN));
    }

    #[test]
    fn non_positive_scale_is_ignored() {
        let mut vp = ViewPort::new(Vec2::ZERO, 2.0, Size::new(10.0, 10.0));
        vp.set_transform(Vec2::new(5.0, 5.0), 0.0, Size::new(1.0, 1.0));
        assert_eq!(vp.scale, 2.0);
        assert_eq!(vp.offset, Vec2::ZERO);
    }
}
