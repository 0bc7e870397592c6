//! Shapes and resolved outlines
//!
//! A [`Shape`] is a style-level description in logical units with
//! direction-relative corners. Resolving it against a concrete size,
//! [`Density`] and [`LayoutDirection`] produces an [`Outline`] in pixels,
//! which is what gets filled and what offscreen layers clip to.

use crate::geometry::{Point, Rect, Size};

/// Pixel density scale factor (logical unit -> pixel)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density(pub f32);

impl Density {
    pub fn to_px(&self, logical: f32) -> f32 {
        logical * self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Density(1.0)
    }
}

/// Horizontal layout direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Direction-relative corner radii in logical units
///
/// `start` corners map to the left in [`LayoutDirection::Ltr`] and to the
/// right in [`LayoutDirection::Rtl`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadius {
    pub top_start: f32,
    pub top_end: f32,
    pub bottom_end: f32,
    pub bottom_start: f32,
}

impl CornerRadius {
    pub const ZERO: CornerRadius = CornerRadius {
        top_start: 0.0,
        top_end: 0.0,
        bottom_end: 0.0,
        bottom_start: 0.0,
    };

    pub const fn uniform(radius: f32) -> Self {
        Self {
            top_start: radius,
            top_end: radius,
            bottom_end: radius,
            bottom_start: radius,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.top_start <= 0.0
            && self.top_end <= 0.0
            && self.bottom_end <= 0.0
            && self.bottom_start <= 0.0
    }
}

/// Style-level shape of a region
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Shape {
    #[default]
    Rectangle,
    Rounded(CornerRadius),
}

impl Shape {
    /// Convenience constructor for a uniformly rounded shape
    pub const fn rounded(radius: f32) -> Self {
        Shape::Rounded(CornerRadius::uniform(radius))
    }

    /// Resolve this shape to pixel geometry at the origin.
    ///
    /// Radii are density-scaled, clamped to half the smaller dimension, and
    /// mapped from start/end to left/right according to `direction`.
    pub fn create_outline(
        &self,
        size: Size,
        density: Density,
        direction: LayoutDirection,
    ) -> Outline {
        let rect = Rect::from_origin_size(Point::ZERO, size);
        match self {
            Shape::Rectangle => Outline::Rect(rect),
            Shape::Rounded(radius) if radius.is_zero() => Outline::Rect(rect),
            Shape::Rounded(radius) => {
                let max = size.min_dimension() / 2.0;
                let px = |logical: f32| density.to_px(logical).clamp(0.0, max.max(0.0));
                let (top_left, top_right, bottom_right, bottom_left) = match direction {
                    LayoutDirection::Ltr => (
                        radius.top_start,
                        radius.top_end,
                        radius.bottom_end,
                        radius.bottom_start,
                    ),
                    LayoutDirection::Rtl => (
                        radius.top_end,
                        radius.top_start,
                        radius.bottom_start,
                        radius.bottom_end,
                    ),
                };
                Outline::Rounded {
                    rect,
                    radii: ResolvedRadii {
                        top_left: px(top_left),
                        top_right: px(top_right),
                        bottom_right: px(bottom_right),
                        bottom_left: px(bottom_left),
                    },
                }
            }
        }
    }
}

/// Per-corner radii in pixels, already direction-resolved
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResolvedRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

/// Resolved region geometry in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outline {
    Rect(Rect),
    Rounded { rect: Rect, radii: ResolvedRadii },
}

impl Outline {
    /// Bounding rect of the outline
    pub fn bounds(&self) -> Rect {
        match self {
            Outline::Rect(rect) => *rect,
            Outline::Rounded { rect, .. } => *rect,
        }
    }

    /// The outline moved by `delta`, radii unchanged
    pub fn translated(&self, delta: Point) -> Outline {
        match self {
            Outline::Rect(rect) => Outline::Rect(rect.translate(delta)),
            Outline::Rounded { rect, radii } => Outline::Rounded {
                rect: rect.translate(delta),
                radii: *radii,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_outline() {
        let outline =
            Shape::Rectangle.create_outline(Size::new(100.0, 50.0), Density(2.0), LayoutDirection::Ltr);
        assert_eq!(outline, Outline::Rect(Rect::new(0.0, 0.0, 100.0, 50.0)));
    }

    #[test]
    fn test_zero_radius_collapses_to_rect() {
        let outline = Shape::Rounded(CornerRadius::ZERO).create_outline(
            Size::new(100.0, 50.0),
            Density(1.0),
            LayoutDirection::Ltr,
        );
        assert!(matches!(outline, Outline::Rect(_)));
    }

    #[test]
    fn test_density_scales_radii() {
        let outline = Shape::rounded(8.0).create_outline(
            Size::new(100.0, 100.0),
            Density(2.0),
            LayoutDirection::Ltr,
        );
        match outline {
            Outline::Rounded { radii, .. } => {
                assert_eq!(radii.top_left, 16.0);
                assert_eq!(radii.bottom_right, 16.0);
            }
            Outline::Rect(_) => panic!("expected rounded outline"),
        }
    }

    #[test]
    fn test_radii_clamped_to_half_min_dimension() {
        let outline = Shape::rounded(100.0).create_outline(
            Size::new(40.0, 80.0),
            Density(1.0),
            LayoutDirection::Ltr,
        );
        match outline {
            Outline::Rounded { radii, .. } => assert_eq!(radii.top_left, 20.0),
            Outline::Rect(_) => panic!("expected rounded outline"),
        }
    }

    #[test]
    fn test_rtl_swaps_start_end() {
        let radius = CornerRadius {
            top_start: 4.0,
            top_end: 8.0,
            bottom_end: 12.0,
            bottom_start: 16.0,
        };
        let outline = Shape::Rounded(radius).create_outline(
            Size::new(100.0, 100.0),
            Density(1.0),
            LayoutDirection::Rtl,
        );
        match outline {
            Outline::Rounded { radii, .. } => {
                assert_eq!(radii.top_left, 8.0);
                assert_eq!(radii.top_right, 4.0);
                assert_eq!(radii.bottom_right, 16.0);
                assert_eq!(radii.bottom_left, 12.0);
            }
            Outline::Rect(_) => panic!("expected rounded outline"),
        }
    }

    #[test]
    fn test_translated_outline() {
        let outline = Shape::rounded(8.0).create_outline(
            Size::new(100.0, 100.0),
            Density(1.0),
            LayoutDirection::Ltr,
        );
        let moved = outline.translated(Point::new(-10.0, -20.0));
        assert_eq!(moved.bounds(), Rect::new(-10.0, -20.0, 100.0, 100.0));
        match moved {
            Outline::Rounded { radii, .. } => assert_eq!(radii.top_left, 8.0),
            Outline::Rect(_) => panic!("expected rounded outline"),
        }
    }
}
