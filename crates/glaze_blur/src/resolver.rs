//! Overlap resolution
//!
//! Computes, for one background, which parts of which content layers are
//! visible through it. The search area is the background rect inflated by
//! the blur radius in pixels, because the blur filter samples beyond the
//! visible edge. Each eligible content rect is clipped against the search
//! area; the surviving pieces, in stacking order, form the
//! [`DisplayedContent`] composite together with the union of their bounds.
//!
//! Everything here works in value space and compares results structurally;
//! an unchanged composite must produce no redraw downstream.

use glaze_core::{Density, LayerId, Rect};
use smallvec::SmallVec;

use crate::record::{BackgroundKey, DisplayedContent, DisplayedEntry};
use crate::registry::BlurRegistry;

/// Snapshot of one eligible content record, taken in stacking order
#[derive(Clone, Copy, Debug)]
pub struct ContentView {
    pub rect: Rect,
    pub layer: LayerId,
}

/// Outcome of a [`OverlapResolver::resolve`] pass
#[derive(Clone, Copy, Debug)]
pub struct Resolution {
    /// The stored composite was replaced
    pub displayed_changed: bool,
}

/// Recomputes background composites against the registry
pub struct OverlapResolver;

impl OverlapResolver {
    /// Recompute the composite for `key` and store it back if it changed.
    ///
    /// `outline_changed` forces the clip outline to be re-derived even when
    /// the composite bounds stayed put. An unmeasured or empty background
    /// resolves to the empty composite. Unknown keys report no change.
    pub fn resolve(
        registry: &mut BlurRegistry,
        key: BackgroundKey,
        density: Density,
        outline_changed: bool,
    ) -> Resolution {
        let Some(record) = registry.background(key) else {
            tracing::trace!("resolve for unknown background {key:?}");
            return Resolution {
                displayed_changed: false,
            };
        };
        let background_rect = record.screen_rect;
        let blur_radius = record.style.blur_radius;

        let new = match background_rect {
            Some(rect) if !rect.is_empty() => {
                let views = eligible_views(registry);
                compute_displayed_content(rect, density.to_px(blur_radius), &views)
            }
            _ => DisplayedContent::empty(),
        };

        let Some(record) = registry.background_mut(key) else {
            return Resolution {
                displayed_changed: false,
            };
        };
        record.resolve_count += 1;
        let bounds_changed = new.bounds != record.displayed.bounds;
        if outline_changed || bounds_changed {
            record.clip_outline = record
                .outline
                .as_ref()
                .map(|outline| outline.translated(-new.bounds.top_left()));
        }
        if new == record.displayed {
            return Resolution {
                displayed_changed: false,
            };
        }
        tracing::trace!(
            "background {key:?} composite changed: {} entries, bounds {:?}",
            new.entries.len(),
            new.bounds,
        );
        record.displayed = new;
        Resolution {
            displayed_changed: true,
        }
    }
}

/// Snapshot every eligible content record, stacking order ascending
fn eligible_views(registry: &mut BlurRegistry) -> SmallVec<[ContentView; 8]> {
    registry
        .eligible_content_sorted()
        .into_iter()
        .filter_map(|key| {
            let record = registry.content(key)?;
            Some(ContentView {
                rect: record.screen_rect?,
                layer: record.layer?,
            })
        })
        .collect()
}

/// Clip `contents` against the background's search area.
///
/// The search area is `background_rect` inflated by `search_inflation`
/// pixels on every side. Contents that miss it entirely (strictly negative
/// intersection in either dimension) are skipped; zero-area touches are
/// kept so an edge-adjacent content still contributes once blur sampling
/// reaches it. Entry rects and the union bounds come out in
/// background-local coordinates.
pub fn compute_displayed_content(
    background_rect: Rect,
    search_inflation: f32,
    contents: &[ContentView],
) -> DisplayedContent {
    let search_rect = background_rect.inflate(search_inflation);

    let mut entries: SmallVec<[DisplayedEntry; 4]> = SmallVec::new();
    let mut left = f32::MAX;
    let mut top = f32::MAX;
    let mut right = f32::MIN;
    let mut bottom = f32::MIN;

    for content in contents {
        let intersection = content.rect.intersect(search_rect);
        if intersection.width < 0.0 || intersection.height < 0.0 {
            continue;
        }
        left = left.min(intersection.left());
        top = top.min(intersection.top());
        right = right.max(intersection.right());
        bottom = bottom.max(intersection.bottom());
        entries.push(DisplayedEntry {
            relative_rect: intersection.translate(-background_rect.top_left()),
            layer: content.layer,
            content_offset: intersection.top_left() - content.rect.top_left(),
        });
    }

    if entries.is_empty() {
        return DisplayedContent::empty();
    }
    DisplayedContent {
        entries,
        bounds: Rect::from_ltrb(left, top, right, bottom)
            .translate(-background_rect.top_left()),
    }
}
