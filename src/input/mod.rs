//! Touch input types.
//!
//! Hosts translate their platform touch events into [`InputEvent`]s. Only the vertical coordinate
//! of the first touch point drives the overscroll gesture.

use std::time::Duration;

use arrayvec::ArrayVec;

pub mod swipe_tracker;
mod touch;

pub use touch::TouchInput;

/// Maximum number of simultaneous touch points carried by an event.
pub const MAX_TOUCH_POINTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Platform identifier of the touch point.
    pub slot: u32,
    /// Vertical position in logical pixels, growing downward.
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub points: ArrayVec<TouchPoint, MAX_TOUCH_POINTS>,
    /// Event timestamp on the host's monotonic clock.
    pub time: Duration,
}

impl TouchEvent {
    /// Creates an event without touch points.
    pub fn new(time: Duration) -> Self {
        Self {
            points: ArrayVec::new(),
            time,
        }
    }

    /// Creates an event with a single touch point in slot 0.
    pub fn single(y: f64, time: Duration) -> Self {
        Self::new(time).with_point(TouchPoint { slot: 0, y })
    }

    /// Adds a touch point, dropping it if the event is already full.
    pub fn with_point(mut self, point: TouchPoint) -> Self {
        if self.points.try_push(point).is_err() {
            trace!("dropping touch point in slot {}, event is full", point.slot);
        }
        self
    }

    /// The touch point that drives gestures.
    pub fn primary(&self) -> Option<&TouchPoint> {
        self.points.first()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    TouchStart(TouchEvent),
    TouchMove(TouchEvent),
    TouchEnd(TouchEvent),
    TouchCancel(TouchEvent),
}

impl InputEvent {
    pub fn time(&self) -> Duration {
        match self {
            InputEvent::TouchStart(evt)
            | InputEvent::TouchMove(evt)
            | InputEvent::TouchEnd(evt)
            | InputEvent::TouchCancel(evt) => evt.time,
        }
    }
}

/// What the host should do with the platform event after the controller saw it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HandledTouch {
    /// Whether native scrolling and pull-to-refresh must be suppressed for this event.
    pub prevent_default: bool,
}

impl HandledTouch {
    pub const PASS: Self = Self {
        prevent_default: false,
    };

    pub const CONSUMED: Self = Self {
        prevent_default: true,
    };
}
