#![forbid(unsafe_code)]

//! Pixel-space geometric primitives.

use serde::{Deserialize, Serialize};

/// A point in pixel space.
///
/// Uses layout coordinates (origin at the grid container's top-left corner,
/// y growing downward). Cursor positions may go negative when the pointer
/// leaves the container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[inline]
    #[must_use]
    pub fn delta(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Translate by a delta.
    #[inline]
    #[must_use]
    pub fn translate(self, delta: Point) -> Point {
        Point::new(self.x + delta.x, self.y + delta.y)
    }
}

/// A size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Size};

    #[test]
    fn point_delta_and_translate_are_inverses() {
        let a = Point::new(12.5, -3.0);
        let b = Point::new(4.0, 9.0);
        let d = a.delta(b);
        assert_eq!(b.translate(d), a);
    }

    #[test]
    fn point_zero_is_identity_for_translate() {
        let p = Point::new(7.0, 11.0);
        assert_eq!(p.translate(Point::ZERO), p);
        assert_eq!(p.delta(Point::ZERO), p);
    }

    #[test]
    fn size_new() {
        let s = Size::new(90.0, 60.0);
        assert_eq!(s.width, 90.0);
        assert_eq!(s.height, 60.0);
    }
}
