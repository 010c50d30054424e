//! Viewport scroll tracking and tail-follow animation

pub mod auto_scroll;
pub mod tracker;

pub use auto_scroll::{AnimationHandle, AutoScrollController, ScrollStep};
pub use tracker::{ScrollOffsets, ScrollTracker, Viewport};
