//! Background tracking
//!
//! A [`BackgroundTracker`] is attached to a region that shows a blurred
//! composite of the content regions behind it. It accumulates attribute
//! changes as dirty bits and consumes them in one staged pass per frame,
//! so a burst of notifications costs one recomputation:
//!
//! 1. blur render attributes on the composite layer
//! 2. outline resolution against size, density and layout direction
//! 3. overlap resolution, with a redraw request only when the stored
//!    composite actually changed
//! 4. draw-only changes (colors), which skip recomputation entirely
//!
//! Draw replays the stored composite: flat fill, the clipped blur layer,
//! tint, then the region's own content on top.

use glaze_core::{
    BlurEffect, Canvas, Color, Compositor, Density, LayoutDirection, Outline, Point, Rect,
    RedrawFlag, Shape, Size, TileMode,
};

use crate::fields::DirtyFields;
use crate::record::{BackgroundKey, BackgroundStyle};
use crate::registry::SharedBlurRegistry;
use crate::resolver::OverlapResolver;

/// Tracker for one blur background region
#[derive(Debug)]
pub struct BackgroundTracker {
    registry: SharedBlurRegistry,
    key: Option<BackgroundKey>,
    style: BackgroundStyle,
    redraw: RedrawFlag,
    dirty: DirtyFields,
    position: Option<Point>,
    size: Option<Size>,
    density: Density,
    layout_direction: LayoutDirection,
    /// Registry version last consumed by [`BackgroundTracker::update`]
    seen_contents: u64,
    is_drawn: bool,
}

impl BackgroundTracker {
    /// Create a detached tracker bound to a registry scope.
    ///
    /// `redraw` is the flag the host's frame scheduler polls; the tracker
    /// sets it whenever an already-drawn background needs repainting.
    pub fn new(registry: SharedBlurRegistry, style: BackgroundStyle, redraw: RedrawFlag) -> Self {
        Self {
            registry,
            key: None,
            style,
            redraw,
            dirty: DirtyFields::EMPTY,
            position: None,
            size: None,
            density: Density::default(),
            layout_direction: LayoutDirection::default(),
            seen_contents: 0,
            is_drawn: false,
        }
    }

    /// Registry key, present while attached with blur enabled
    pub fn key(&self) -> Option<BackgroundKey> {
        self.key
    }

    pub fn style(&self) -> &BackgroundStyle {
        &self.style
    }

    /// Register with the registry and allocate the composite layer.
    ///
    /// When blur is disabled for the scope the tracker stays unregistered
    /// and [`BackgroundTracker::draw`] degrades to a flat fill.
    pub fn attach(&mut self, compositor: &mut dyn Compositor) {
        let mut registry = self.registry.borrow_mut();
        if !registry.is_blur_enabled() {
            return;
        }
        let key = registry.register_background();
        if let Some(record) = registry.background_mut(key) {
            record.style = self.style;
            record.layer = Some(compositor.create_layer());
        }
        self.key = Some(key);
        self.seen_contents = registry.contents_version();
        self.dirty = DirtyFields::ALL;
        self.is_drawn = false;
    }

    /// Unregister and release the composite layer
    pub fn detach(&mut self, compositor: &mut dyn Compositor) {
        if let Some(key) = self.key.take() {
            if let Some(layer) = self.registry.borrow_mut().unregister_background(key) {
                compositor.release_layer(layer);
            }
        }
        self.dirty = DirtyFields::EMPTY;
        self.is_drawn = false;
    }

    // =========================================================================
    // Attribute notifications
    // =========================================================================

    pub fn set_blur_radius(&mut self, radius: f32) {
        if self.style.blur_radius != radius {
            self.style.blur_radius = radius;
            self.sync_style();
            self.dirty.insert(DirtyFields::BLUR_RADIUS);
        }
    }

    pub fn set_shape(&mut self, shape: Shape) {
        if self.style.shape != shape {
            self.style.shape = shape;
            self.sync_style();
            self.dirty.insert(DirtyFields::SHAPE);
        }
    }

    pub fn set_tint_color(&mut self, color: Option<Color>) {
        if self.style.tint_color != color {
            self.style.tint_color = color;
            self.sync_style();
            self.dirty.insert(DirtyFields::TINT_COLOR);
        }
    }

    pub fn set_background_color(&mut self, color: Option<Color>) {
        if self.style.background_color != color {
            self.style.background_color = color;
            self.sync_style();
            self.dirty.insert(DirtyFields::BACKGROUND_COLOR);
        }
    }

    pub fn set_tile_mode(&mut self, tile_mode: TileMode) {
        if self.style.tile_mode != tile_mode {
            self.style.tile_mode = tile_mode;
            self.sync_style();
            self.dirty.insert(DirtyFields::TILE_MODE);
        }
    }

    pub fn set_density(&mut self, density: Density) {
        if self.density != density {
            self.density = density;
            self.dirty.insert(DirtyFields::DENSITY);
        }
    }

    pub fn set_layout_direction(&mut self, direction: LayoutDirection) {
        if self.layout_direction != direction {
            self.layout_direction = direction;
            self.dirty.insert(DirtyFields::LAYOUT_DIRECTION);
        }
    }

    /// Layout placement callback with the region's rect in screen space
    pub fn on_placed(&mut self, rect: Rect) {
        if self.position != Some(rect.top_left()) {
            self.position = Some(rect.top_left());
            self.dirty.insert(DirtyFields::POSITION);
        }
        if self.size != Some(rect.size()) {
            self.size = Some(rect.size());
            self.dirty.insert(DirtyFields::SIZE);
        }
        if let Some(key) = self.key {
            self.registry.borrow_mut().update_background_rect(key, rect);
        }
    }

    fn sync_style(&mut self) {
        if let Some(key) = self.key {
            if let Some(record) = self.registry.borrow_mut().background_mut(key) {
                record.style = self.style;
            }
        }
    }

    // =========================================================================
    // Recomputation
    // =========================================================================

    /// Consume the accumulated dirty bits in one staged pass.
    ///
    /// The stages run against a snapshot of the bits taken at entry, so a
    /// stage that clears its own group cannot hide a later stage's
    /// trigger. Stage 3 returns as soon as the composite is known to have
    /// changed; any remaining draw-only bits stay set and are consumed on
    /// the next pass.
    pub fn update(&mut self, compositor: &mut dyn Compositor) {
        let Some(key) = self.key else {
            return;
        };
        if self.registry.borrow().changed_since(self.seen_contents) {
            self.dirty.insert(DirtyFields::CONTENT_SET);
        }
        let pass = self.dirty;
        if pass.is_empty() {
            return;
        }
        tracing::trace!("background {key:?} update pass: {pass:?}");

        let mut registry = self.registry.borrow_mut();
        self.seen_contents = registry.contents_version();

        if pass.intersects(DirtyFields::LAYER_EFFECT_AFFECTING) {
            if let Some(layer) = registry.background(key).and_then(|record| record.layer) {
                let radius_px = self.density.to_px(self.style.blur_radius);
                let effect =
                    (radius_px > 0.0).then(|| BlurEffect::new(radius_px, self.style.tile_mode));
                compositor.set_layer_effect(layer, effect);
            }
            // The blur radius also sizes the search area, so its bit stays
            // set for the resolver stage below.
            self.dirty.remove(DirtyFields::TILE_MODE);
        }

        let mut outline_changed = false;
        if pass.intersects(DirtyFields::OUTLINE_AFFECTING) {
            if let (Some(size), Some(record)) = (self.size, registry.background_mut(key)) {
                record.outline =
                    Some(self.style.shape.create_outline(size, self.density, self.layout_direction));
                outline_changed = true;
            }
            self.dirty.remove(DirtyFields::OUTLINE_AFFECTING);
        }

        if pass.intersects(DirtyFields::CONTENT_AFFECTING) {
            self.dirty.remove(DirtyFields::CONTENT_AFFECTING);
            let outcome =
                OverlapResolver::resolve(&mut registry, key, self.density, outline_changed);
            if outcome.displayed_changed {
                if self.is_drawn {
                    self.redraw.request();
                }
                return;
            }
        }

        if pass.intersects(DirtyFields::DRAW_ONLY) {
            self.dirty.remove(DirtyFields::DRAW_ONLY);
            if self.is_drawn {
                self.redraw.request();
            }
        }
    }

    // =========================================================================
    // Draw
    // =========================================================================

    /// Draw pass.
    ///
    /// Runs [`BackgroundTracker::update`] first, re-records the composite
    /// layer from the stored [`DisplayedContent`](crate::DisplayedContent),
    /// and emits fill, layer and content commands into `canvas`. With blur
    /// disabled this is a flat fill of background color and tint.
    pub fn draw(&mut self, compositor: &mut dyn Compositor, canvas: &mut Canvas) {
        let Some(key) = self.key else {
            self.draw_flat(canvas);
            return;
        };
        self.update(compositor);

        // Contents registered before this background attached produce no
        // version change it could observe, so an empty composite on the
        // very first draw forces one recomputation.
        if !self.is_drawn {
            let empty = self
                .registry
                .borrow()
                .background(key)
                .is_some_and(|record| record.displayed.is_empty());
            if empty {
                self.dirty.insert(DirtyFields::CONTENT_SET);
                self.update(compositor);
            }
        }

        {
            let registry = self.registry.borrow();
            let Some(record) = registry.background(key) else {
                canvas.draw_content();
                return;
            };

            if let (Some(outline), Some(color)) = (record.outline, self.style.background_color) {
                canvas.fill_outline(outline, color);
            }

            if let Some(layer) = record.layer {
                if !record.displayed.is_empty() {
                    let bounds = record.displayed.bounds;
                    compositor.set_layer_top_left(layer, bounds.top_left());
                    compositor.set_layer_clip(layer, record.clip_outline);

                    let mut recording = Canvas::new();
                    for entry in &record.displayed.entries {
                        recording.draw_layer(
                            entry.layer,
                            entry.relative_rect.top_left()
                                - bounds.top_left()
                                - entry.content_offset,
                        );
                    }
                    compositor.record_layer(layer, bounds.size(), recording.finish());
                    canvas.draw_layer(layer, Point::ZERO);
                }
            }

            if let (Some(outline), Some(color)) = (record.outline, self.style.tint_color) {
                canvas.fill_outline(outline, color);
            }
        }
        canvas.draw_content();
        self.is_drawn = true;
    }

    fn draw_flat(&self, canvas: &mut Canvas) {
        if let Some(size) = self.size {
            let outline = Outline::Rect(Rect::from_origin_size(Point::ZERO, size));
            if let Some(color) = self.style.background_color {
                canvas.fill_outline(outline, color);
            }
            if let Some(color) = self.style.tint_color {
                canvas.fill_outline(outline, color);
            }
        }
        canvas.draw_content();
    }
}
