//! Registry records
//!
//! Per-region state stored in the [`BlurRegistry`](crate::BlurRegistry).
//! Trackers identify their record by key and never hold a direct alias;
//! everything mutable lives behind the registry so detach/re-attach cycles
//! cannot leave dangling references.

use glaze_core::{Color, LayerId, Outline, Rect, Shape, TileMode};
use smallvec::SmallVec;

/// Identity of a registered blur source.
///
/// Registry-allocated keys use a reserved high bit, so caller-minted tokens
/// (stable across detach/re-attach of the same logical region) can never
/// collide with them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContentKey(u64);

impl ContentKey {
    const AUTO_BIT: u64 = 1 << 63;

    /// Mint a caller-supplied identity token
    pub const fn token(value: u64) -> Self {
        Self(value & !Self::AUTO_BIT)
    }

    pub(crate) const fn auto(counter: u64) -> Self {
        Self(counter | Self::AUTO_BIT)
    }
}

/// Identity of a registered blur background
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BackgroundKey(pub(crate) u64);

/// Registration of one blur source
#[derive(Clone, Debug)]
pub struct ContentRecord {
    pub key: ContentKey,
    /// Explicit stacking order; `None` sorts after all specified orders
    pub stack_order: Option<f32>,
    /// Last observed rect in screen coordinates; `None` until first layout
    pub screen_rect: Option<Rect>,
    /// Offscreen capture of the content, allocated on first draw
    pub layer: Option<LayerId>,
}

impl ContentRecord {
    pub(crate) fn new(key: ContentKey, stack_order: Option<f32>) -> Self {
        Self {
            key,
            stack_order,
            screen_rect: None,
            layer: None,
        }
    }

    /// A record takes part in background composition only once it has been
    /// measured to a non-empty rect and captured into a layer.
    pub fn is_eligible(&self) -> bool {
        self.layer.is_some() && self.screen_rect.is_some_and(|rect| !rect.is_empty())
    }
}

/// Style attributes of one blur background
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BackgroundStyle {
    /// Blur radius in logical units; zero disables the blur effect
    pub blur_radius: f32,
    pub shape: Shape,
    /// Tint drawn over the blurred composite
    pub tint_color: Option<Color>,
    /// Flat fill drawn under the blurred composite
    pub background_color: Option<Color>,
    pub tile_mode: TileMode,
}

impl BackgroundStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blur_radius(mut self, radius: f32) -> Self {
        self.blur_radius = radius;
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_tint_color(mut self, color: Color) -> Self {
        self.tint_color = Some(color);
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_tile_mode(mut self, tile_mode: TileMode) -> Self {
        self.tile_mode = tile_mode;
        self
    }
}

/// Registration of one blur background
#[derive(Clone, Debug)]
pub struct BackgroundRecord {
    pub key: BackgroundKey,
    pub style: BackgroundStyle,
    /// Last observed rect in screen coordinates; `None` until first layout
    pub screen_rect: Option<Rect>,
    /// Resolved outline at local origin; `None` until first measured
    pub outline: Option<Outline>,
    /// Outline translated into composite-layer space
    pub clip_outline: Option<Outline>,
    /// Composite currently shown by this background
    pub displayed: DisplayedContent,
    /// Offscreen composite layer
    pub layer: Option<LayerId>,
    /// Number of resolver passes over this record
    pub resolve_count: u32,
}

impl BackgroundRecord {
    pub(crate) fn new(key: BackgroundKey) -> Self {
        Self {
            key,
            style: BackgroundStyle::default(),
            screen_rect: None,
            outline: None,
            clip_outline: None,
            displayed: DisplayedContent::empty(),
            layer: None,
            resolve_count: 0,
        }
    }
}

/// One content region's contribution to a background composite
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayedEntry {
    /// Overlap rect in background-local coordinates
    pub relative_rect: Rect,
    /// The content's capture layer
    pub layer: LayerId,
    /// Overlap origin relative to the content's own origin
    pub content_offset: glaze_core::Point,
}

/// The composite a background currently displays.
///
/// Equality is exact structural equality; it is the sole gate for
/// requesting a redraw, so it must not be approximate.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayedContent {
    pub entries: SmallVec<[DisplayedEntry; 4]>,
    /// Union of the entry rects in background-local coordinates
    pub bounds: Rect,
}

impl DisplayedContent {
    /// The empty sentinel: no entries, zero bounds
    pub fn empty() -> Self {
        Self {
            entries: SmallVec::new(),
            bounds: Rect::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() || self.bounds.is_empty()
    }
}

impl Default for DisplayedContent {
    fn default() -> Self {
        Self::empty()
    }
}
