//! Dirty-field bitmask
//!
//! Every mutable attribute of a tracked region has a bit; trackers collect
//! bits as notifications arrive and a single recomputation pass consumes
//! them group by group. The groups encode which expensive stage a change
//! invalidates: layer render attributes, the resolved outline, the
//! displayed-content composite, or just the draw.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Set of attributes changed since the last fully processed pass
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyFields(u16);

impl DirtyFields {
    pub const EMPTY: DirtyFields = DirtyFields(0);

    pub const POSITION: DirtyFields = DirtyFields(1);
    pub const SIZE: DirtyFields = DirtyFields(1 << 1);
    pub const SHAPE: DirtyFields = DirtyFields(1 << 2);
    pub const BLUR_RADIUS: DirtyFields = DirtyFields(1 << 3);
    pub const TINT_COLOR: DirtyFields = DirtyFields(1 << 4);
    pub const DENSITY: DirtyFields = DirtyFields(1 << 5);
    pub const LAYOUT_DIRECTION: DirtyFields = DirtyFields(1 << 6);
    pub const BACKGROUND_COLOR: DirtyFields = DirtyFields(1 << 7);
    pub const CONTENT_SET: DirtyFields = DirtyFields(1 << 8);
    pub const TILE_MODE: DirtyFields = DirtyFields(1 << 9);

    /// Fields that invalidate the resolved outline
    pub const OUTLINE_AFFECTING: DirtyFields = DirtyFields(
        Self::SIZE.0 | Self::SHAPE.0 | Self::DENSITY.0 | Self::LAYOUT_DIRECTION.0,
    );

    /// Fields that invalidate the layer's blur render attributes
    pub const LAYER_EFFECT_AFFECTING: DirtyFields =
        DirtyFields(Self::BLUR_RADIUS.0 | Self::TILE_MODE.0);

    /// Fields that invalidate the displayed-content composite
    pub const CONTENT_AFFECTING: DirtyFields = DirtyFields(
        Self::OUTLINE_AFFECTING.0 | Self::POSITION.0 | Self::BLUR_RADIUS.0 | Self::CONTENT_SET.0,
    );

    /// Fields that only require a repaint
    pub const DRAW_ONLY: DirtyFields =
        DirtyFields(Self::TINT_COLOR.0 | Self::BACKGROUND_COLOR.0);

    pub const ALL: DirtyFields = DirtyFields(
        Self::CONTENT_AFFECTING.0 | Self::LAYER_EFFECT_AFFECTING.0 | Self::DRAW_ONLY.0,
    );

    pub fn insert(&mut self, fields: DirtyFields) {
        self.0 |= fields.0;
    }

    pub fn remove(&mut self, fields: DirtyFields) {
        self.0 &= !fields.0;
    }

    /// True if *all* bits of `fields` are set
    pub fn contains(&self, fields: DirtyFields) -> bool {
        self.0 & fields.0 == fields.0
    }

    /// True if *any* bit of `fields` is set
    pub fn intersects(&self, fields: DirtyFields) -> bool {
        self.0 & fields.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for DirtyFields {
    type Output = DirtyFields;

    fn bitor(self, rhs: DirtyFields) -> DirtyFields {
        DirtyFields(self.0 | rhs.0)
    }
}

impl BitOrAssign for DirtyFields {
    fn bitor_assign(&mut self, rhs: DirtyFields) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for DirtyFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(DirtyFields, &str); 10] = [
            (DirtyFields::POSITION, "Position"),
            (DirtyFields::SIZE, "Size"),
            (DirtyFields::SHAPE, "Shape"),
            (DirtyFields::BLUR_RADIUS, "BlurRadius"),
            (DirtyFields::TINT_COLOR, "TintColor"),
            (DirtyFields::DENSITY, "Density"),
            (DirtyFields::LAYOUT_DIRECTION, "LayoutDirection"),
            (DirtyFields::BACKGROUND_COLOR, "BackgroundColor"),
            (DirtyFields::CONTENT_SET, "ContentSet"),
            (DirtyFields::TILE_MODE, "TileMode"),
        ];
        let mut set = f.debug_set();
        for (field, name) in NAMES {
            if self.contains(field) {
                set.entry(&name);
            }
        }
        set.finish()
    }
}
