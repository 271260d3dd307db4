//! Editing state for voxsketch.
//!
//! - [`Playback`] — frame sequence with an idle/playing/paused state
//!   machine driven by host-supplied elapsed time.
//! - [`History`] — copy/paste stack where every entry carries its own copy
//!   capability.
//! - [`DragTracker`] and [`ActionRegistry`] — platform-neutral pointer and
//!   named-action input.
//! - [`Sketch`] — draws rasterized strokes onto a
//!   [`TileGrid`](voxsketch_core::TileGrid).

mod history;
mod input;
mod playback;
mod sketch;

pub use history::{Duplicate, History};
pub use input::{ActionBinding, ActionRegistry, Drag, DragTracker, PointerAction, PointerEvent};
pub use playback::{FrameFactory, PlayState, Playback, PlaybackConfig, PlaybackError};
pub use sketch::{Sketch, Stroke};
