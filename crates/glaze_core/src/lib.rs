//! Glaze Core
//!
//! Foundational primitives for the glaze blur library:
//!
//! - **Geometry**: points, sizes, rectangles with the edge-clamped
//!   intersection that overlap resolution is built on
//! - **Shapes**: style-level shapes resolved to pixel outlines against
//!   density and layout direction
//! - **Compositor interface**: the offscreen-layer seam to the host
//!   renderer, plus a headless reference implementation for tests
//! - **Redraw requests**: per-region repaint flags for the host's frame
//!   scheduler
//!
//! This crate knows nothing about blur bookkeeping; that lives in
//! `glaze_blur`.

pub mod color;
pub mod compositor;
pub mod geometry;
pub mod invalidate;
pub mod shape;

pub use color::Color;
pub use compositor::{
    BlurEffect, Canvas, Compositor, DrawCommand, HeadlessCompositor, LayerId, LayerState, TileMode,
};
pub use geometry::{Point, Rect, Size};
pub use invalidate::RedrawFlag;
pub use shape::{CornerRadius, Density, LayoutDirection, Outline, ResolvedRadii, Shape};
