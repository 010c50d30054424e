//! Stroke replay

pub mod renderer;

pub use renderer::{in_window, DrawingSurface, PlaybackState, StrokeRenderer};
