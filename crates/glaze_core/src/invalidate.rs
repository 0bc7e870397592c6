//! Redraw requests
//!
//! A [`RedrawFlag`] is the channel through which glaze asks the host to
//! repaint one region without forcing a relayout. The host hands one flag
//! to each tracked region and polls it during frame scheduling.
//!
//! Flags are deliberately `!Send`: every mutation in glaze happens on the
//! single UI thread, and the type system is used to keep it that way.

use std::cell::Cell;
use std::rc::Rc;

/// Cloneable per-region redraw request flag
#[derive(Clone, Debug, Default)]
pub struct RedrawFlag(Rc<Cell<bool>>);

impl RedrawFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a redraw of the owning region
    pub fn request(&self) {
        self.0.set(true);
    }

    /// True if a redraw has been requested and not yet consumed
    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    /// Consume the request, returning whether one was pending
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}
