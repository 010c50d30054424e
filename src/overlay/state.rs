//! Positioning and shadow law of an overlay
//!
//! An overlay rests where its source sits in the document. Along its sticky
//! axis it follows the scroll until it reaches the viewport edge, then stays
//! there; along the other axis it moves with the table. The shadow ramps in
//! over `shadow_distance` pixels once the overlay detaches from its resting
//! position.

use super::layout::{LayoutPort, LayoutTarget, Offset, Shadow};
use crate::scroll::ScrollOffsets;

/// Axis along which an overlay sticks to the viewport edge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Position along the sticky axis.
/// Tracks the scroll until it would pass the resting position, never above 0.
pub fn sticky_position(initial: f64, scroll: f64) -> f64 {
    initial.min(initial - scroll).max(0.0)
}

/// Position along the non-sticky axis: pinned to the original offset under the scroll
pub fn tracking_position(initial: f64, scroll: f64) -> f64 {
    initial - scroll
}

/// Shadow intensity for the unclamped sticky-axis position `raw`.
/// Zero while the overlay rests, 1 once it is `distance` pixels past its resting place.
pub fn shadow_factor(raw: f64, distance: f64) -> f64 {
    if !(distance > 0.0) || !(raw < 0.0) {
        return 0.0;
    }
    (-raw / distance).clamp(0.0, 1.0)
}

/// Per-surface overlay state, mutated only by scroll updates
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayState {
    pub sticky_axis: Axis,
    pub initial_top_offset: f64,
    pub current_top_offset: f64,
    pub initial_left_offset: f64,
    pub current_left_offset: f64,
    pub shadow_distance: f64,
    pub shadow: Shadow,
    pub last_scroll_top: Option<f64>,
    pub last_scroll_left: Option<f64>,
}

/// What changed after a scroll update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayUpdate {
    pub position: Offset,
    /// New shadow when it differs from the previous one
    pub shadow: Option<Shadow>,
}

impl OverlayState {
    pub fn new(sticky_axis: Axis, initial: Offset, shadow_distance: f64) -> Self {
        Self {
            sticky_axis,
            initial_top_offset: initial.top,
            current_top_offset: initial.top,
            initial_left_offset: initial.left,
            current_left_offset: initial.left,
            shadow_distance,
            shadow: Shadow::Flat,
            last_scroll_top: None,
            last_scroll_left: None,
        }
    }

    pub fn position(&self) -> Offset {
        Offset::new(self.current_top_offset, self.current_left_offset)
    }

    /// Forget the last seen offsets so the next update recomputes
    pub fn invalidate(&mut self) {
        self.last_scroll_top = None;
        self.last_scroll_left = None;
    }

    /// Recompute position and shadow for `offsets`.
    /// Returns `None` when neither scroll axis moved since the previous update.
    pub fn update(&mut self, offsets: ScrollOffsets) -> Option<OverlayUpdate> {
        let top_changed = self.last_scroll_top != Some(offsets.top);
        let left_changed = self.last_scroll_left != Some(offsets.left);
        if !top_changed && !left_changed {
            return None;
        }
        self.last_scroll_top = Some(offsets.top);
        self.last_scroll_left = Some(offsets.left);

        let (sticky_initial, sticky_scroll) = match self.sticky_axis {
            Axis::Vertical => (self.initial_top_offset, offsets.top),
            Axis::Horizontal => (self.initial_left_offset, offsets.left),
        };
        let sticky = sticky_position(sticky_initial, sticky_scroll);

        match self.sticky_axis {
            Axis::Vertical => {
                self.current_top_offset = sticky;
                self.current_left_offset = tracking_position(self.initial_left_offset, offsets.left);
            }
            Axis::Horizontal => {
                self.current_left_offset = sticky;
                self.current_top_offset = tracking_position(self.initial_top_offset, offsets.top);
            }
        }

        let raw = sticky_initial - sticky_scroll;
        let shadow = Shadow::from_factor(shadow_factor(raw, self.shadow_distance));
        let shadow_changed = shadow != self.shadow;
        self.shadow = shadow;

        Some(OverlayUpdate {
            position: self.position(),
            shadow: shadow_changed.then_some(shadow),
        })
    }
}

/// Push an update to the overlay container. Returns whether anything was applied.
pub(crate) fn apply_update(
    update: Option<OverlayUpdate>,
    target: LayoutTarget,
    layout: &mut impl LayoutPort,
) -> bool {
    let Some(update) = update else {
        return false;
    };
    layout.set_position(target, update.position);
    if let Some(shadow) = update.shadow {
        layout.set_shadow(target, shadow);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(top: f64, left: f64) -> ScrollOffsets {
        ScrollOffsets { top, left }
    }

    #[test]
    fn test_sticky_position_clamps() {
        assert_eq!(sticky_position(100.0, 0.0), 100.0);
        assert_eq!(sticky_position(100.0, 40.0), 60.0);
        assert_eq!(sticky_position(100.0, 100.0), 0.0);
        assert_eq!(sticky_position(100.0, 500.0), 0.0);
    }

    #[test]
    fn test_shadow_factor_ramp() {
        assert_eq!(shadow_factor(20.0, 10.0), 0.0);
        assert_eq!(shadow_factor(0.0, 10.0), 0.0);
        assert_eq!(shadow_factor(-5.0, 10.0), 0.5);
        assert_eq!(shadow_factor(-10.0, 10.0), 1.0);
        assert_eq!(shadow_factor(-400.0, 10.0), 1.0);
    }

    #[test]
    fn test_shadow_factor_monotonic_and_bounded() {
        let mut previous = f64::INFINITY;
        for step in -200..200 {
            let raw = step as f64 * 0.5;
            let factor = shadow_factor(raw, 10.0);
            assert!((0.0..=1.0).contains(&factor));
            // raw grows as the overlay moves back toward its resting place
            assert!(factor <= previous);
            previous = factor;
        }
    }

    #[test]
    fn test_header_overlay_update() {
        let mut state = OverlayState::new(Axis::Vertical, Offset::new(100.0, 20.0), 10.0);

        let update = state.update(offsets(0.0, 0.0)).unwrap();
        assert_eq!(update.position, Offset::new(100.0, 20.0));
        assert_eq!(update.shadow, None);

        let update = state.update(offsets(105.0, 30.0)).unwrap();
        assert_eq!(update.position, Offset::new(0.0, -10.0));
        assert_eq!(update.shadow, Some(Shadow::Elevated(0.5)));

        let update = state.update(offsets(50.0, 30.0)).unwrap();
        assert_eq!(update.position, Offset::new(50.0, -10.0));
        assert_eq!(update.shadow, Some(Shadow::Flat));
    }

    #[test]
    fn test_update_gated_on_unchanged_offsets() {
        let mut state = OverlayState::new(Axis::Vertical, Offset::new(100.0, 0.0), 10.0);
        assert!(state.update(offsets(10.0, 0.0)).is_some());
        assert!(state.update(offsets(10.0, 0.0)).is_none());
        assert!(state.update(offsets(10.0, 1.0)).is_some());

        state.invalidate();
        assert!(state.update(offsets(10.0, 1.0)).is_some());
    }

    #[test]
    fn test_columns_overlay_sticks_horizontally() {
        let mut state = OverlayState::new(Axis::Horizontal, Offset::new(100.0, 20.0), 10.0);
        let update = state.update(offsets(40.0, 25.0)).unwrap();
        assert_eq!(update.position, Offset::new(60.0, 0.0));
        assert_eq!(update.shadow, Some(Shadow::Elevated(0.5)));
    }
}
