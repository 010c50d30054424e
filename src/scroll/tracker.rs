//! Viewport scroll offsets
//!
//! Browsers report overscroll (negative offsets, or offsets past the document
//! end during elastic scrolling). Everything downstream works on clamped values.

use serde::{Deserialize, Serialize};

/// Snapshot of the viewport geometry
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub scroll_left: f64,
    pub document_width: f64,
    pub document_height: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Viewport {
    pub fn max_scroll_top(&self) -> f64 {
        positive(self.document_height - self.viewport_height)
    }

    pub fn max_scroll_left(&self) -> f64 {
        positive(self.document_width - self.viewport_width)
    }

    pub fn vertical_offset(&self) -> f64 {
        clamp_offset(self.scroll_top, self.max_scroll_top())
    }

    pub fn horizontal_offset(&self) -> f64 {
        clamp_offset(self.scroll_left, self.max_scroll_left())
    }

    /// True when the document bottom is inside the viewport extended by `threshold` pixels
    pub fn is_near_bottom(&self, threshold: f64) -> bool {
        self.max_scroll_top() - self.vertical_offset() <= threshold.max(0.0)
    }
}

fn positive(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn clamp_offset(raw: f64, max: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, max)
}

/// Clamped scroll position on both axes
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollOffsets {
    pub top: f64,
    pub left: f64,
}

/// Keeps the latest viewport snapshot and answers clamped offsets for it
#[derive(Clone, Debug, Default)]
pub struct ScrollTracker {
    viewport: Viewport,
}

impl ScrollTracker {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    pub fn observe(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn vertical_offset(&self) -> f64 {
        self.viewport.vertical_offset()
    }

    pub fn horizontal_offset(&self) -> f64 {
        self.viewport.horizontal_offset()
    }

    pub fn offsets(&self) -> ScrollOffsets {
        ScrollOffsets {
            top: self.vertical_offset(),
            left: self.horizontal_offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(scroll_top: f64, scroll_left: f64) -> Viewport {
        Viewport {
            scroll_top,
            scroll_left,
            document_width: 1500.0,
            document_height: 3000.0,
            viewport_width: 1000.0,
            viewport_height: 800.0,
        }
    }

    #[test]
    fn test_offsets_clamped() {
        let cases = [
            (-50.0, -3.0, 0.0, 0.0),
            (100.0, 20.0, 100.0, 20.0),
            (2200.0, 500.0, 2200.0, 500.0),
            (9000.0, 9000.0, 2200.0, 500.0),
        ];
        for (top, left, expected_top, expected_left) in cases {
            let tracker = ScrollTracker::new(viewport(top, left));
            assert_eq!(tracker.vertical_offset(), expected_top);
            assert_eq!(tracker.horizontal_offset(), expected_left);
        }
    }

    #[test]
    fn test_document_smaller_than_viewport() {
        let vp = Viewport {
            scroll_top: 30.0,
            scroll_left: 30.0,
            document_width: 500.0,
            document_height: 500.0,
            viewport_width: 1000.0,
            viewport_height: 800.0,
        };
        assert_eq!(vp.vertical_offset(), 0.0);
        assert_eq!(vp.horizontal_offset(), 0.0);
        assert!(vp.is_near_bottom(0.0));
    }

    #[test]
    fn test_nan_offset_is_zero() {
        assert_eq!(viewport(f64::NAN, 0.0).vertical_offset(), 0.0);
    }

    #[test]
    fn test_near_bottom() {
        assert!(viewport(2200.0, 0.0).is_near_bottom(0.0));
        assert!(!viewport(2150.0, 0.0).is_near_bottom(0.0));
        assert!(viewport(2150.0, 0.0).is_near_bottom(60.0));
    }
}
