//! Follow-the-tail scrolling
//!
//! When a row arrives while the reader sits at the bottom of the page, the
//! page animates down to the new bottom. At most one animation is in flight;
//! starting one cancels its predecessor, and any user scroll intent cancels
//! without restarting.

use super::tracker::Viewport;
use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;

/// Cancellation token of one scroll animation.
/// The frame driver checks it at the start of every turn.
#[derive(Clone, Debug)]
pub struct AnimationHandle {
    id: u64,
    cancelled: Rc<Cell<bool>>,
}

impl AnimationHandle {
    fn new(id: u64) -> Self {
        Self {
            id,
            cancelled: Rc::new(Cell::new(false)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }
}

/// An animate-to-target scroll
#[derive(Clone, Debug)]
struct ScrollAnimation {
    handle: AnimationHandle,
    from: f64,
    to: f64,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl ScrollAnimation {
    /// Scroll position `elapsed_ms` into the animation and whether it has finished
    fn position_at(&self, elapsed_ms: f64) -> (f64, bool) {
        if self.duration_ms <= 0.0 || elapsed_ms >= self.duration_ms {
            return (self.to, true);
        }
        let progress = (elapsed_ms / self.duration_ms).max(0.0);
        (self.from + (self.to - self.from) * swing(progress), false)
    }
}

/// Ease-in-out curve used by the page scroll animation
pub fn swing(progress: f64) -> f64 {
    0.5 - (progress * PI).cos() / 2.0
}

/// Scroll requested by one animation frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollStep {
    pub top: f64,
    pub finished: bool,
}

pub struct AutoScrollController {
    duration_ms: f64,
    bottom_threshold: f64,
    in_flight: Option<ScrollAnimation>,
    next_id: u64,
}

impl AutoScrollController {
    pub fn new(duration_ms: f64, bottom_threshold: f64) -> Self {
        Self {
            duration_ms,
            bottom_threshold,
            in_flight: None,
            next_id: 0,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Handle of the in-flight animation, if any
    pub fn current(&self) -> Option<&AnimationHandle> {
        self.in_flight.as_ref().map(|a| &a.handle)
    }

    /// Decide whether a freshly appended row should pull the page down.
    ///
    /// `before` is the viewport as it was when the row arrived, `after` the
    /// viewport once the row is attached (the document may have grown).
    pub fn on_row_appended(&mut self, before: &Viewport, after: &Viewport) -> Option<AnimationHandle> {
        if before.is_near_bottom(self.bottom_threshold) || self.is_animating() {
            Some(self.start(after.vertical_offset(), after.max_scroll_top()))
        } else {
            None
        }
    }

    /// Start an animation from `from` to `to`, cancelling any predecessor first
    pub fn start(&mut self, from: f64, to: f64) -> AnimationHandle {
        self.cancel_in_flight();
        self.next_id += 1;
        let handle = AnimationHandle::new(self.next_id);
        log::debug!("auto-scroll #{} from {} to {}", handle.id, from, to);
        self.in_flight = Some(ScrollAnimation {
            handle: handle.clone(),
            from,
            to,
            duration_ms: self.duration_ms,
            started_at: None,
        });
        handle
    }

    /// User scroll intent (wheel, touch, mouse down): stop without restarting.
    /// Returns whether an animation was stopped.
    pub fn interrupt(&mut self) -> bool {
        self.cancel_in_flight()
    }

    /// Advance the in-flight animation to `now_ms`.
    /// Returns `None` when there is nothing to apply.
    pub fn frame(&mut self, now_ms: f64) -> Option<ScrollStep> {
        let animation = self.in_flight.as_mut()?;
        if animation.handle.is_cancelled() {
            self.in_flight = None;
            return None;
        }
        let started_at = *animation.started_at.get_or_insert(now_ms);
        let (top, finished) = animation.position_at(now_ms - started_at);
        if finished {
            self.in_flight = None;
        }
        Some(ScrollStep { top, finished })
    }

    fn cancel_in_flight(&mut self) -> bool {
        match self.in_flight.take() {
            Some(animation) => {
                animation.handle.cancel();
                true
            }
            None => false,
        }
    }
}
