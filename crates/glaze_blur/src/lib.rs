//! Glaze Blur
//!
//! Overlap tracking and blurred-background compositing for glassmorphism
//! effects. Content regions register themselves as blur sources; background
//! regions resolve which source pixels lie behind them and composite those
//! pixels, blurred and tinted, under their own content.
//!
//! The moving parts:
//!
//! - [`BlurRegistry`]: shared table connecting sources to backgrounds,
//!   observed through a version counter
//! - [`ContentTracker`]: attaches a source region, captures its pixels
//!   into an offscreen layer on draw
//! - [`BackgroundTracker`]: attaches a background region, turns attribute
//!   changes into [`DirtyFields`] bits and consumes them in one staged
//!   pass per frame
//! - [`OverlapResolver`]: clips eligible sources against a background's
//!   blur-inflated search area, producing a [`DisplayedContent`] composite
//!
//! Everything runs on the host's single UI thread; the shared handles are
//! `Rc`-based and deliberately `!Send`.

pub mod background;
pub mod content;
pub mod fields;
pub mod record;
pub mod registry;
pub mod resolver;

pub use background::BackgroundTracker;
pub use content::ContentTracker;
pub use fields::DirtyFields;
pub use record::{
    BackgroundKey, BackgroundRecord, BackgroundStyle, ContentKey, ContentRecord, DisplayedContent,
    DisplayedEntry,
};
pub use registry::{BlurRegistry, SharedBlurRegistry};
pub use resolver::{compute_displayed_content, ContentView, OverlapResolver, Resolution};
