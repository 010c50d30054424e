//! Time-windowed stroke replay
//!
//! Replays a recorded pointer trajectory up to a requested time. Moving
//! forward only draws the new part of the path on top of what is already on
//! the surface; moving backward (or forcing) clears and redraws from the
//! start.
//!
//! A pass walks the events in order and stops at the first event later than
//! the requested time. Events at or before the watermark are walked but not
//! drawn. The watermark starts at 0, so events at or before time 0 are never
//! drawn, and ends on the time of the last event walked.

use crate::error::StrokeError;
use crate::models::{Point, StrokeEvent, StrokeStyle};

/// Drawing port of the replay
pub trait DrawingSurface {
    /// Erase the whole surface
    fn clear(&mut self);

    /// Filled disc marking where the stroke starts
    fn fill_marker(&mut self, center: Point, style: &StrokeStyle);

    /// Start a new path at `at`
    fn begin_path(&mut self, at: Point);

    /// Extend the current path with a straight segment
    fn line_to(&mut self, to: Point);

    /// Paint the current path
    fn stroke(&mut self, style: &StrokeStyle);
}

/// Window predicate of a replay pass: `(start, end]`, a missing bound is open
pub fn in_window(time: f64, start: Option<f64>, end: Option<f64>) -> bool {
    start.map_or(true, |start| time > start) && end.map_or(true, |end| time <= end)
}

/// Playback position of the renderer
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaybackState {
    /// Time of the last event walked, `None` when nothing has been walked since the last clear
    pub current_drawn_time: Option<f64>,

    /// End of the drawn path, where the next forward pass continues from
    pub pen: Option<Point>,
}

pub struct StrokeRenderer<S: DrawingSurface> {
    events: Vec<StrokeEvent>,
    surface: S,
    style: StrokeStyle,
    playback: PlaybackState,
}

impl<S: DrawingSurface> StrokeRenderer<S> {
    pub fn new(events: Vec<StrokeEvent>, surface: S) -> Self {
        Self::with_style(events, surface, StrokeStyle::default())
    }

    pub fn with_style(events: Vec<StrokeEvent>, surface: S, style: StrokeStyle) -> Self {
        Self {
            events,
            surface,
            style,
            playback: PlaybackState::default(),
        }
    }

    pub fn events(&self) -> &[StrokeEvent] {
        &self.events
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    /// Watermark of the replay, 0 before anything was drawn
    pub fn current_drawn_time(&self) -> f64 {
        self.playback.current_drawn_time.unwrap_or(0.0)
    }

    /// First and last event times
    pub fn time_window(&self) -> Result<(f64, f64), StrokeError> {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => Ok((first.time, last.time)),
            _ => Err(StrokeError::EmptyEventSequence),
        }
    }

    /// Render the stroke up to `requested_time` (the whole stroke when `None`)
    pub fn draw(&mut self, requested_time: Option<f64>, force_redraw: bool) {
        if self.events.is_empty() || requested_time.is_some_and(f64::is_nan) {
            return;
        }

        let forward = match (requested_time, self.playback.current_drawn_time) {
            (None, _) | (_, None) => true,
            (Some(requested), Some(drawn)) => requested > drawn,
        };

        if forward && !force_redraw {
            let start = self.current_drawn_time().max(0.0);
            self.render_window(Some(start), requested_time);
        } else {
            self.surface.clear();
            self.playback = PlaybackState::default();
            self.render_window(Some(0.0), requested_time);
        }
    }

    /// Draw events in `(start, end]`; a missing bound is open
    fn render_window(&mut self, start: Option<f64>, end: Option<f64>) {
        let mut path_started = false;

        for event in &self.events {
            if end.is_some_and(|end| event.time > end) {
                break;
            }
            self.playback.current_drawn_time = Some(event.time);

            if !in_window(event.time, start, end) {
                continue;
            }

            let point = event.point();
            if !path_started {
                match self.playback.pen {
                    Some(pen) => {
                        self.surface.begin_path(pen);
                        self.surface.line_to(point);
                    }
                    None => {
                        self.surface.fill_marker(point, &self.style);
                        self.surface.begin_path(point);
                    }
                }
                path_started = true;
            } else {
                self.surface.line_to(point);
            }
            self.playback.pen = Some(point);
        }

        if path_started {
            self.surface.stroke(&self.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSurface {
        clears: usize,
        strokes: usize,
        segments: usize,
        markers: usize,
    }

    impl DrawingSurface for CountingSurface {
        fn clear(&mut self) {
            self.clears += 1;
        }
        fn fill_marker(&mut self, _center: Point, _style: &StrokeStyle) {
            self.markers += 1;
        }
        fn begin_path(&mut self, _at: Point) {}
        fn line_to(&mut self, _to: Point) {
            self.segments += 1;
        }
        fn stroke(&mut self, _style: &StrokeStyle) {
            self.strokes += 1;
        }
    }

    fn events() -> Vec<StrokeEvent> {
        vec![
            StrokeEvent::new(0.0, 0.0, 0.0),
            StrokeEvent::new(10.0, 0.0, 5.0),
            StrokeEvent::new(10.0, 10.0, 10.0),
        ]
    }

    #[test]
    fn test_window_bounds() {
        assert!(!in_window(0.0, Some(0.0), Some(3.0)));
        assert!(in_window(3.0, Some(0.0), Some(3.0)));
        assert!(!in_window(3.5, Some(0.0), Some(3.0)));
        assert!(in_window(0.0, None, Some(3.0)));
        assert!(in_window(1e9, Some(0.0), None));
    }

    #[test]
    fn test_time_window() {
        let renderer = StrokeRenderer::new(events(), CountingSurface::default());
        assert_eq!(renderer.time_window(), Ok((0.0, 10.0)));

        let empty = StrokeRenderer::new(Vec::new(), CountingSurface::default());
        assert_eq!(empty.time_window(), Err(StrokeError::EmptyEventSequence));
    }

    #[test]
    fn test_empty_draw_is_noop() {
        let mut renderer = StrokeRenderer::new(Vec::new(), CountingSurface::default());
        renderer.draw(Some(4.0), true);
        assert_eq!(renderer.surface().clears, 0);
        assert_eq!(renderer.current_drawn_time(), 0.0);
    }

    #[test]
    fn test_watermark_tracks_last_walked_event() {
        let mut renderer = StrokeRenderer::new(events(), CountingSurface::default());
        renderer.draw(Some(7.0), false);
        assert_eq!(renderer.current_drawn_time(), 5.0);

        // nothing new before 10, watermark stays
        renderer.draw(Some(8.0), false);
        assert_eq!(renderer.current_drawn_time(), 5.0);
        assert_eq!(renderer.surface().strokes, 1);

        renderer.draw(None, false);
        assert_eq!(renderer.current_drawn_time(), 10.0);
        assert_eq!(renderer.surface().clears, 0);
    }

    #[test]
    fn test_rewind_clears() {
        let mut renderer = StrokeRenderer::new(events(), CountingSurface::default());
        renderer.draw(None, false);
        renderer.draw(Some(5.0), false);
        assert_eq!(renderer.surface().clears, 1);
        assert_eq!(renderer.current_drawn_time(), 5.0);
        assert_eq!(renderer.surface().markers, 2);
    }

    #[test]
    fn test_nan_request_is_ignored() {
        let mut renderer = StrokeRenderer::new(events(), CountingSurface::default());
        renderer.draw(Some(7.0), false);
        renderer.draw(Some(f64::NAN), true);
        assert_eq!(renderer.surface().clears, 0);
        assert_eq!(renderer.current_drawn_time(), 5.0);
    }
}
