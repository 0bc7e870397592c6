//! Content tracking
//!
//! A [`ContentTracker`] is attached to a region whose pixels should show
//! through nearby blur backgrounds. It registers the region with the
//! shared registry, reports layout placement, and on every draw re-records
//! the region's content into an offscreen capture layer before drawing the
//! content normally.
//!
//! The capture layer is allocated lazily on the first draw. A region that
//! never draws (or is never placed) never becomes eligible and costs the
//! backgrounds nothing.

use glaze_core::{Canvas, Compositor, DrawCommand, Rect};

use crate::record::ContentKey;
use crate::registry::SharedBlurRegistry;

/// Tracker for one blur source region
#[derive(Debug)]
pub struct ContentTracker {
    registry: SharedBlurRegistry,
    key: Option<ContentKey>,
}

impl ContentTracker {
    /// Create a detached tracker bound to a registry scope
    pub fn new(registry: SharedBlurRegistry) -> Self {
        Self {
            registry,
            key: None,
        }
    }

    /// Registry key, present while attached with blur enabled
    pub fn key(&self) -> Option<ContentKey> {
        self.key
    }

    /// Register with the registry.
    ///
    /// `identity` carries the region's key across detach/re-attach cycles;
    /// `None` lets the registry allocate one. When blur is disabled for the
    /// scope the tracker stays unregistered and every later call is a no-op.
    pub fn attach(&mut self, identity: Option<ContentKey>, stack_order: Option<f32>) {
        let mut registry = self.registry.borrow_mut();
        if !registry.is_blur_enabled() {
            return;
        }
        self.key = Some(registry.register_content(identity.or(self.key), stack_order));
    }

    /// Update the stacking order; unchanged values do not disturb observers
    pub fn set_stack_order(&mut self, stack_order: Option<f32>) {
        if let Some(key) = self.key {
            self.registry.borrow_mut().register_content(Some(key), stack_order);
        }
    }

    /// Layout placement callback with the region's rect in screen space
    pub fn on_placed(&mut self, rect: Rect) {
        if let Some(key) = self.key {
            self.registry.borrow_mut().update_content_rect(key, rect);
        }
    }

    /// Draw pass.
    ///
    /// Re-records the region's content into its capture layer (allocating
    /// the layer on first draw), then draws the content into `canvas` as
    /// usual. Content pixels may change every frame without any layout
    /// notification, so the capture is refreshed unconditionally.
    pub fn draw(&mut self, compositor: &mut dyn Compositor, canvas: &mut Canvas, bounds: Rect) {
        if let Some(key) = self.key {
            let layer = self
                .registry
                .borrow_mut()
                .ensure_content_layer(key, || compositor.create_layer());
            if let Some(layer) = layer {
                compositor.record_layer(layer, bounds.size(), vec![DrawCommand::Content]);
            }
        }
        canvas.draw_content();
    }

    /// Unregister and release the capture layer
    pub fn detach(&mut self, compositor: &mut dyn Compositor) {
        if let Some(key) = self.key.take() {
            if let Some(layer) = self.registry.borrow_mut().unregister_content(key) {
                compositor.release_layer(layer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BlurRegistry;
    use glaze_core::HeadlessCompositor;

    fn rect() -> Rect {
        Rect::new(10.0, 10.0, 100.0, 100.0)
    }

    #[test]
    fn test_attach_registers_and_placement_is_recorded() {
        let registry = BlurRegistry::shared(true);
        let mut tracker = ContentTracker::new(registry.clone());

        tracker.attach(None, Some(1.0));
        let key = tracker.key().unwrap();
        tracker.on_placed(rect());

        let shared = registry.borrow();
        let record = shared.content(key).unwrap();
        assert_eq!(record.screen_rect, Some(rect()));
        assert_eq!(record.stack_order, Some(1.0));
        assert!(!record.is_eligible(), "not drawn yet");
    }

    #[test]
    fn test_blur_disabled_keeps_tracker_inert() {
        let registry = BlurRegistry::shared(false);
        let mut compositor = HeadlessCompositor::new();
        let mut tracker = ContentTracker::new(registry.clone());

        tracker.attach(None, None);
        assert!(tracker.key().is_none());
        tracker.on_placed(rect());

        let mut canvas = Canvas::new();
        tracker.draw(&mut compositor, &mut canvas, rect());
        // Content is still drawn, but no layer is ever allocated.
        assert_eq!(canvas.commands(), &[DrawCommand::Content]);
        assert_eq!(compositor.live_layers(), 0);

        tracker.detach(&mut compositor);
        assert_eq!(registry.borrow().contents_version(), 0);
    }

    #[test]
    fn test_first_draw_allocates_layer_and_records_content() {
        let registry = BlurRegistry::shared(true);
        let mut compositor = HeadlessCompositor::new();
        let mut tracker = ContentTracker::new(registry.clone());

        tracker.attach(None, None);
        tracker.on_placed(rect());

        let mut canvas = Canvas::new();
        tracker.draw(&mut compositor, &mut canvas, rect());
        assert_eq!(compositor.live_layers(), 1);

        let key = tracker.key().unwrap();
        let layer = registry.borrow().content(key).unwrap().layer.unwrap();
        let state = compositor.layer(layer).unwrap();
        assert_eq!(state.size, rect().size());
        assert_eq!(state.commands, vec![DrawCommand::Content]);
        assert_eq!(state.record_count, 1);
        assert!(registry.borrow().content(key).unwrap().is_eligible());

        // Every draw refreshes the capture; the layer itself is reused.
        let mut canvas = Canvas::new();
        tracker.draw(&mut compositor, &mut canvas, rect());
        assert_eq!(compositor.live_layers(), 1);
        assert_eq!(compositor.layer(layer).unwrap().record_count, 2);
    }

    #[test]
    fn test_detach_releases_layer() {
        let registry = BlurRegistry::shared(true);
        let mut compositor = HeadlessCompositor::new();
        let mut tracker = ContentTracker::new(registry.clone());

        tracker.attach(None, None);
        tracker.on_placed(rect());
        tracker.draw(&mut compositor, &mut Canvas::new(), rect());

        tracker.detach(&mut compositor);
        assert!(tracker.key().is_none());
        assert_eq!(compositor.live_layers(), 0);
        assert_eq!(compositor.released_layers(), 1);

        // Double detach is harmless.
        tracker.detach(&mut compositor);
        assert_eq!(compositor.released_layers(), 1);
    }

    #[test]
    fn test_identity_token_survives_reattach() {
        let registry = BlurRegistry::shared(true);
        let mut compositor = HeadlessCompositor::new();
        let token = ContentKey::token(7);

        let mut tracker = ContentTracker::new(registry.clone());
        tracker.attach(Some(token), Some(2.0));
        assert_eq!(tracker.key(), Some(token));
        tracker.detach(&mut compositor);

        let mut tracker = ContentTracker::new(registry.clone());
        tracker.attach(Some(token), Some(2.0));
        assert_eq!(tracker.key(), Some(token));
        tracker.detach(&mut compositor);
    }
}
