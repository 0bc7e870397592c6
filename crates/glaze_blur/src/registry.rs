//! Shared blur registry
//!
//! The registry is the table connecting blur sources to blur backgrounds.
//! Content trackers push their screen rects and capture layers into it;
//! background trackers read a stacking-ordered view of the eligible sources
//! out of it. One registry instance serves one logical screen scope and is
//! shared behind [`SharedBlurRegistry`].
//!
//! Observation is a version counter: every mutation of the content set
//! bumps `contents_version`, and subscribers compare the version they last
//! consumed instead of re-reading the whole table.
//!
//! All operations on unknown keys are silent no-ops; detach ordering
//! between independently-lifecycled regions is not guaranteed, so a
//! tracker may legitimately address a record that is already gone.

use std::cell::RefCell;
use std::rc::Rc;

use glaze_core::{LayerId, Rect};
use rustc_hash::FxHashMap;

use crate::record::{BackgroundKey, BackgroundRecord, ContentKey, ContentRecord};

/// Shared handle to a [`BlurRegistry`].
///
/// Deliberately `!Send`: all registry mutation happens on the single UI
/// thread, and the handle type enforces that statically.
pub type SharedBlurRegistry = Rc<RefCell<BlurRegistry>>;

/// Table of blur sources and blur backgrounds for one screen scope
#[derive(Debug)]
pub struct BlurRegistry {
    blur_enabled: bool,
    next_content_id: u64,
    next_background_id: u64,
    contents: FxHashMap<ContentKey, ContentRecord>,
    /// Registration order; the tie-breaker for equal stack orders
    content_order: Vec<ContentKey>,
    backgrounds: FxHashMap<BackgroundKey, BackgroundRecord>,
    contents_version: u64,
    eligible_cache: Option<Vec<ContentKey>>,
}

impl BlurRegistry {
    pub fn new(blur_enabled: bool) -> Self {
        Self {
            blur_enabled,
            next_content_id: 0,
            next_background_id: 0,
            contents: FxHashMap::default(),
            content_order: Vec::new(),
            backgrounds: FxHashMap::default(),
            contents_version: 0,
            eligible_cache: None,
        }
    }

    /// Create a registry wrapped in its shared handle
    pub fn shared(blur_enabled: bool) -> SharedBlurRegistry {
        Rc::new(RefCell::new(Self::new(blur_enabled)))
    }

    /// Whether blur is in effect for this registry's lifetime.
    ///
    /// When false, trackers never register and backgrounds degrade to a
    /// flat fill.
    pub fn is_blur_enabled(&self) -> bool {
        self.blur_enabled
    }

    /// Current version of the content set
    pub fn contents_version(&self) -> u64 {
        self.contents_version
    }

    /// Subscriber check: has the content set changed since `version`?
    pub fn changed_since(&self, version: u64) -> bool {
        self.contents_version != version
    }

    fn bump(&mut self) {
        self.contents_version += 1;
        self.eligible_cache = None;
    }

    // =========================================================================
    // Content records
    // =========================================================================

    /// Register a blur source, or update the stack order of an existing one.
    ///
    /// With `key: None` a fresh identity is allocated. Re-registering a
    /// known key is idempotent and only applies `stack_order`; the stored
    /// rect and layer are untouched.
    pub fn register_content(
        &mut self,
        key: Option<ContentKey>,
        stack_order: Option<f32>,
    ) -> ContentKey {
        let key = key.unwrap_or_else(|| {
            let key = ContentKey::auto(self.next_content_id);
            self.next_content_id += 1;
            key
        });
        if let Some(record) = self.contents.get_mut(&key) {
            if record.stack_order != stack_order {
                record.stack_order = stack_order;
                self.bump();
            }
            return key;
        }
        tracing::debug!("register content {key:?} (stack_order: {stack_order:?})");
        self.contents.insert(key, ContentRecord::new(key, stack_order));
        self.content_order.push(key);
        self.bump();
        key
    }

    /// Remove a blur source, handing its capture layer back to the caller
    /// for release. Unknown keys are a no-op.
    pub fn unregister_content(&mut self, key: ContentKey) -> Option<LayerId> {
        let Some(record) = self.contents.remove(&key) else {
            tracing::trace!("unregister of unknown content {key:?}");
            return None;
        };
        tracing::debug!("unregister content {key:?}");
        self.content_order.retain(|k| *k != key);
        self.bump();
        record.layer
    }

    /// Store a freshly observed screen rect. Returns whether the stored
    /// value actually changed; unchanged rects short-circuit without
    /// bumping the version.
    pub fn update_content_rect(&mut self, key: ContentKey, rect: Rect) -> bool {
        let Some(record) = self.contents.get_mut(&key) else {
            tracing::trace!("rect update for unknown content {key:?}");
            return false;
        };
        if record.screen_rect == Some(rect) {
            return false;
        }
        record.screen_rect = Some(rect);
        self.bump();
        true
    }

    /// Get the source's capture layer, allocating one through `create` on
    /// first use. Layer attach changes eligibility, so it bumps the
    /// version. Returns `None` for unknown keys.
    pub fn ensure_content_layer(
        &mut self,
        key: ContentKey,
        create: impl FnOnce() -> LayerId,
    ) -> Option<LayerId> {
        let record = self.contents.get_mut(&key)?;
        if let Some(layer) = record.layer {
            return Some(layer);
        }
        let layer = create();
        record.layer = Some(layer);
        self.bump();
        Some(layer)
    }

    pub fn content(&self, key: ContentKey) -> Option<&ContentRecord> {
        self.contents.get(&key)
    }

    /// Keys of all eligible sources, stacking order ascending.
    ///
    /// `stack_order: None` sorts last; ties keep registration order (the
    /// sort is stable over the registration-order list). The view is
    /// cached until the next content mutation.
    pub fn eligible_content_sorted(&mut self) -> Vec<ContentKey> {
        if self.eligible_cache.is_none() {
            let mut keys: Vec<ContentKey> = self
                .content_order
                .iter()
                .copied()
                .filter(|key| self.contents[key].is_eligible())
                .collect();
            keys.sort_by(|a, b| {
                let a = self.contents[a].stack_order;
                let b = self.contents[b].stack_order;
                match (a, b) {
                    (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                }
            });
            self.eligible_cache = Some(keys);
        }
        self.eligible_cache.clone().unwrap_or_default()
    }

    // =========================================================================
    // Background records
    // =========================================================================

    /// Register a blur background
    pub fn register_background(&mut self) -> BackgroundKey {
        let key = BackgroundKey(self.next_background_id);
        self.next_background_id += 1;
        tracing::debug!("register background {key:?}");
        self.backgrounds.insert(key, BackgroundRecord::new(key));
        key
    }

    /// Remove a blur background, handing its composite layer back to the
    /// caller for release. Unknown keys are a no-op.
    pub fn unregister_background(&mut self, key: BackgroundKey) -> Option<LayerId> {
        let Some(record) = self.backgrounds.remove(&key) else {
            tracing::trace!("unregister of unknown background {key:?}");
            return None;
        };
        tracing::debug!("unregister background {key:?}");
        record.layer
    }

    /// Store a freshly observed screen rect; unchanged rects short-circuit.
    pub fn update_background_rect(&mut self, key: BackgroundKey, rect: Rect) -> bool {
        let Some(record) = self.backgrounds.get_mut(&key) else {
            tracing::trace!("rect update for unknown background {key:?}");
            return false;
        };
        if record.screen_rect == Some(rect) {
            return false;
        }
        record.screen_rect = Some(rect);
        true
    }

    pub fn background(&self, key: BackgroundKey) -> Option<&BackgroundRecord> {
        self.backgrounds.get(&key)
    }

    pub(crate) fn background_mut(&mut self, key: BackgroundKey) -> Option<&mut BackgroundRecord> {
        self.backgrounds.get_mut(&key)
    }
}

impl Drop for BlurRegistry {
    fn drop(&mut self) {
        // All trackers should have detached before the scope is torn down;
        // anything still registered leaks its layer to the host's
        // compositor teardown.
        if !self.contents.is_empty() || !self.backgrounds.is_empty() {
            tracing::warn!(
                "registry dropped with {} content and {} background records still registered",
                self.contents.len(),
                self.backgrounds.len(),
            );
        }
    }
}
