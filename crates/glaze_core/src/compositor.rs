//! Offscreen layer interface
//!
//! This is the seam between glaze and the host renderer. The host exposes
//! GPU-backed offscreen layers through the [`Compositor`] trait; glaze
//! records [`DrawCommand`] lists into them and composites them back with
//! layer-level render attributes (clip outline, blur effect).
//!
//! [`HeadlessCompositor`] is a reference implementation that records
//! everything and renders nothing. The test suites are built on it, and
//! host integrations can use it to unit test draw logic without a GPU.

use slotmap::{new_key_type, SlotMap};

use crate::color::Color;
use crate::geometry::{Point, Size};
use crate::shape::Outline;

new_key_type! {
    /// Handle to an offscreen layer owned by a [`Compositor`]
    pub struct LayerId;
}

/// Edge sampling mode for the blur filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TileMode {
    #[default]
    Clamp,
    Repeat,
    Mirror,
    Decal,
}

/// Layer-level blur render attribute
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlurEffect {
    pub radius_x: f32,
    pub radius_y: f32,
    pub tile_mode: TileMode,
}

impl BlurEffect {
    /// Uniform blur with the given radius in pixels
    pub fn new(radius: f32, tile_mode: TileMode) -> Self {
        Self {
            radius_x: radius,
            radius_y: radius,
            tile_mode,
        }
    }
}

/// A recorded draw operation
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Fill an outline with a solid color
    FillOutline { outline: Outline, color: Color },
    /// Composite an offscreen layer, translated by `offset`
    Layer { layer: LayerId, offset: Point },
    /// The region's own subtree; the host replays its widgets here
    Content,
}

/// Recording surface for one draw pass or one layer recording
#[derive(Debug, Default)]
pub struct Canvas {
    commands: Vec<DrawCommand>,
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn fill_outline(&mut self, outline: Outline, color: Color) {
        self.commands.push(DrawCommand::FillOutline { outline, color });
    }

    pub fn draw_layer(&mut self, layer: LayerId, offset: Point) {
        self.commands.push(DrawCommand::Layer { layer, offset });
    }

    pub fn draw_content(&mut self) {
        self.commands.push(DrawCommand::Content);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Consume the canvas, yielding the recorded commands
    pub fn finish(self) -> Vec<DrawCommand> {
        self.commands
    }
}

/// Host renderer interface for offscreen layers.
///
/// Layers are created and released explicitly; every layer has exactly one
/// owner on the glaze side, and the owner releases it on teardown.
/// Implementations must tolerate operations on already-released ids (detach
/// ordering between independently-lifecycled regions is not guaranteed).
pub trait Compositor {
    /// Allocate a new offscreen layer
    fn create_layer(&mut self) -> LayerId;

    /// Release a layer previously returned by [`Compositor::create_layer`]
    fn release_layer(&mut self, layer: LayerId);

    /// Position the layer's content in the current canvas space
    fn set_layer_top_left(&mut self, layer: LayerId, top_left: Point);

    /// Clip the layer to an outline, or remove the clip
    fn set_layer_clip(&mut self, layer: LayerId, clip: Option<Outline>);

    /// Apply or remove a blur render effect
    fn set_layer_effect(&mut self, layer: LayerId, effect: Option<BlurEffect>);

    /// Replace the layer's content with a freshly recorded command list
    fn record_layer(&mut self, layer: LayerId, size: Size, commands: Vec<DrawCommand>);
}

/// Recorded state of one headless layer
#[derive(Clone, Debug, Default)]
pub struct LayerState {
    pub top_left: Point,
    pub clip: Option<Outline>,
    pub effect: Option<BlurEffect>,
    pub size: Size,
    pub commands: Vec<DrawCommand>,
    /// Number of times the layer content was re-recorded
    pub record_count: u32,
}

/// A [`Compositor`] that records everything and renders nothing
#[derive(Debug, Default)]
pub struct HeadlessCompositor {
    layers: SlotMap<LayerId, LayerState>,
    released: u32,
}

impl HeadlessCompositor {
    pub fn new() -> Self {
        Self {
            layers: SlotMap::with_key(),
            released: 0,
        }
    }

    /// Inspect a live layer's recorded state
    pub fn layer(&self, layer: LayerId) -> Option<&LayerState> {
        self.layers.get(layer)
    }

    /// Number of currently live layers
    pub fn live_layers(&self) -> usize {
        self.layers.len()
    }

    /// Number of layers released so far
    pub fn released_layers(&self) -> u32 {
        self.released
    }

    fn layer_mut(&mut self, layer: LayerId, op: &str) -> Option<&mut LayerState> {
        let state = self.layers.get_mut(layer);
        if state.is_none() {
            tracing::warn!("{op} on released layer {layer:?}");
        }
        state
    }
}

impl Compositor for HeadlessCompositor {
    fn create_layer(&mut self) -> LayerId {
        let id = self.layers.insert(LayerState::default());
        tracing::debug!("created layer {id:?}");
        id
    }

    fn release_layer(&mut self, layer: LayerId) {
        if self.layers.remove(layer).is_some() {
            self.released += 1;
            tracing::debug!("released layer {layer:?}");
        } else {
            tracing::warn!("release of unknown layer {layer:?}");
        }
    }

    fn set_layer_top_left(&mut self, layer: LayerId, top_left: Point) {
        if let Some(state) = self.layer_mut(layer, "set_layer_top_left") {
            state.top_left = top_left;
        }
    }

    fn set_layer_clip(&mut self, layer: LayerId, clip: Option<Outline>) {
        if let Some(state) = self.layer_mut(layer, "set_layer_clip") {
            state.clip = clip;
        }
    }

    fn set_layer_effect(&mut self, layer: LayerId, effect: Option<BlurEffect>) {
        if let Some(state) = self.layer_mut(layer, "set_layer_effect") {
            state.effect = effect;
        }
    }

    fn record_layer(&mut self, layer: LayerId, size: Size, commands: Vec<DrawCommand>) {
        if let Some(state) = self.layer_mut(layer, "record_layer") {
            state.size = size;
            state.commands = commands;
            state.record_count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    #[test]
    fn test_canvas_records_in_order() {
        let mut canvas = Canvas::new();
        canvas.fill_outline(Outline::Rect(Rect::new(0.0, 0.0, 10.0, 10.0)), Color::BLACK);
        canvas.draw_content();
        let commands = canvas.finish();
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], DrawCommand::FillOutline { .. }));
        assert!(matches!(commands[1], DrawCommand::Content));
    }

    #[test]
    fn test_layer_lifecycle() {
        let mut compositor = HeadlessCompositor::new();
        let layer = compositor.create_layer();
        assert_eq!(compositor.live_layers(), 1);

        compositor.set_layer_top_left(layer, Point::new(5.0, 6.0));
        compositor.record_layer(layer, Size::new(10.0, 10.0), vec![DrawCommand::Content]);
        let state = compositor.layer(layer).unwrap();
        assert_eq!(state.top_left, Point::new(5.0, 6.0));
        assert_eq!(state.record_count, 1);

        compositor.release_layer(layer);
        assert_eq!(compositor.live_layers(), 0);
        assert_eq!(compositor.released_layers(), 1);
    }

    #[test]
    fn test_operations_on_released_layer_are_tolerated() {
        let mut compositor = HeadlessCompositor::new();
        let layer = compositor.create_layer();
        compositor.release_layer(layer);

        // None of these may panic; they are logged no-ops.
        compositor.set_layer_top_left(layer, Point::ZERO);
        compositor.set_layer_clip(layer, None);
        compositor.set_layer_effect(layer, Some(BlurEffect::new(4.0, TileMode::Clamp)));
        compositor.record_layer(layer, Size::ZERO, Vec::new());
        compositor.release_layer(layer);
        assert_eq!(compositor.released_layers(), 1);
    }
}
