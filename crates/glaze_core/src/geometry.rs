//! Geometry primitives used throughout glaze
//!
//! All coordinates are `f32` in global screen space unless a function says
//! otherwise. Rectangles are axis-aligned and stored as origin + size.
//!
//! Degenerate rectangles (negative width or height) are representable on
//! purpose: [`Rect::intersect`] reports "no overlap" by returning one, and
//! overlap resolution filters them out rather than erroring.

use std::ops::{Add, Neg, Sub};

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero or negative
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Smaller of the two dimensions
    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// 2D axis-aligned rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Build a rect from edges. May be degenerate when `right < left` or
    /// `bottom < top`; callers that care must check [`Rect::is_empty`].
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True when the rect covers no area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// True when `other` lies fully inside `self` (edge contact counts)
    pub fn contains_rect(&self, other: Rect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Edge-clamped intersection.
    ///
    /// When the rects do not overlap the result has negative width or
    /// height; a result with *zero* width or height means the rects touch
    /// without overlapping.
    pub fn intersect(&self, other: Rect) -> Rect {
        Rect::from_ltrb(
            self.left().max(other.left()),
            self.top().max(other.top()),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }

    /// Grow the rect by `d` on all four sides (negative `d` shrinks)
    pub fn inflate(&self, d: f32) -> Rect {
        Rect::new(
            self.x - d,
            self.y - d,
            self.width + 2.0 * d,
            self.height + 2.0 * d,
        )
    }

    /// Move the rect by a delta
    pub fn translate(&self, delta: Point) -> Rect {
        Rect::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, 2.0);
        assert_eq!(a + b, Point::new(4.0, 6.0));
        assert_eq!(a - b, Point::new(2.0, 2.0));
        assert_eq!(-a, Point::new(-3.0, -4.0));
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.top_left(), Point::new(10.0, 20.0));
        assert!(!r.is_empty());
    }

    #[test]
    fn test_intersect_overlapping() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(90.0, 90.0, 50.0, 50.0);
        let i = a.intersect(b);
        assert_eq!(i, Rect::new(90.0, 90.0, 10.0, 10.0));
    }

    #[test]
    fn test_intersect_disjoint_is_degenerate() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(150.0, 150.0, 10.0, 10.0);
        let i = a.intersect(b);
        assert!(i.width < 0.0);
        assert!(i.height < 0.0);
        assert!(i.is_empty());
    }

    #[test]
    fn test_intersect_touching_is_zero_area() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(100.0, 0.0, 50.0, 100.0);
        let i = a.intersect(b);
        assert_eq!(i.width, 0.0);
        assert_eq!(i.height, 100.0);
    }

    #[test]
    fn test_inflate() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(r.inflate(5.0), Rect::new(5.0, 5.0, 30.0, 30.0));
        assert_eq!(r.inflate(0.0), r);
        // Shrinking past zero produces a degenerate rect, not a panic.
        assert!(r.inflate(-15.0).is_empty());
    }

    #[test]
    fn test_translate() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        let moved = r.translate(Point::new(-10.0, 5.0));
        assert_eq!(moved, Rect::new(0.0, 15.0, 20.0, 20.0));
    }

    #[test]
    fn test_contains_rect() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(Rect::new(10.0, 10.0, 50.0, 50.0)));
        assert!(outer.contains_rect(outer));
        assert!(!outer.contains_rect(Rect::new(60.0, 60.0, 50.0, 50.0)));
    }
}
