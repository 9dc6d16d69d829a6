//! Overscroll offset that can be static, dragged, or settling.

use std::time::Duration;

use super::Settle;
use crate::animation::Animation;
use crate::input::swipe_tracker::SwipeTracker;
use crate::rubber_band::RubberBand;

/// The damped overscroll distance.
#[derive(Debug)]
pub enum OverscrollOffset {
    /// The offset is static.
    Static(f64),
    /// The offset follows an ongoing drag.
    Gesture(DragGesture),
    /// The offset is settling after a release.
    Animation { anim: Animation, settle: Settle },
}

/// Drag state while the finger is past the boundary.
#[derive(Debug)]
pub struct DragGesture {
    /// Raw distance past the reference point, positive into the overscroll region.
    pub tracker: SwipeTracker,
    pub band: RubberBand,
}

impl DragGesture {
    pub fn new(band: RubberBand) -> Self {
        Self {
            tracker: SwipeTracker::new(),
            band,
        }
    }

    /// Raw, undamped drag distance.
    pub fn raw(&self) -> f64 {
        self.tracker.pos()
    }

    pub fn damped(&self) -> f64 {
        self.band.band(self.raw())
    }

    /// Moves the drag to the raw distance `raw` at `time`.
    pub fn update(&mut self, raw: f64, time: Duration) {
        self.tracker.push(raw - self.tracker.pos(), time);
    }

    /// Release velocity in damped units per second.
    pub fn damped_velocity(&self) -> f64 {
        self.tracker.velocity() * self.band.derivative(self.raw())
    }
}

impl OverscrollOffset {
    pub fn new() -> Self {
        Self::Static(0.)
    }

    /// Returns the displayed value.
    ///
    /// Settle curves may overshoot, so this can dip below zero while springing back.
    pub fn current(&self) -> f64 {
        match self {
            OverscrollOffset::Static(offset) => *offset,
            OverscrollOffset::Gesture(gesture) => gesture.damped(),
            OverscrollOffset::Animation { anim, .. } => anim.value(),
        }
    }

    /// Returns the value the offset is heading to.
    pub fn target(&self) -> f64 {
        match self {
            OverscrollOffset::Static(offset) => *offset,
            OverscrollOffset::Gesture(gesture) => gesture.damped(),
            OverscrollOffset::Animation { anim, .. } => anim.to(),
        }
    }

    pub fn is_gesture(&self) -> bool {
        matches!(self, Self::Gesture(_))
    }

    pub fn is_animation_ongoing(&self) -> bool {
        matches!(self, Self::Animation { .. })
    }

    /// Returns the pending settle, if any.
    pub fn settle(&self) -> Option<Settle> {
        match self {
            OverscrollOffset::Animation { settle, .. } => Some(*settle),
            _ => None,
        }
    }

    pub fn gesture_mut(&mut self) -> Option<&mut DragGesture> {
        match self {
            OverscrollOffset::Gesture(gesture) => Some(gesture),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::animation::{Clock, Curve};

    #[test]
    fn static_value() {
        let v = OverscrollOffset::new();
        assert!(!v.is_gesture());
        assert!(!v.is_animation_ongoing());
        assert_eq!(v.current(), 0.);
        assert_eq!(v.target(), 0.);
        assert_eq!(v.settle(), None);
    }

    #[test]
    fn gesture_is_damped() {
        let mut gesture = DragGesture::new(RubberBand::new(250.));
        gesture.update(100., Duration::from_millis(10));
        gesture.update(150., Duration::from_millis(20));
        assert_eq!(gesture.raw(), 150.);

        let v = OverscrollOffset::Gesture(gesture);
        assert_abs_diff_eq!(v.current(), 158.03, epsilon = 0.01);
        assert_eq!(v.current(), v.target());
    }

    #[test]
    fn animation_target_is_end_value() {
        let clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::ease(clock.clone(), 100., 0., 400, Curve::Linear);
        let v = OverscrollOffset::Animation {
            anim,
            settle: Settle::SpringBack,
        };
        assert_eq!(v.current(), 100.);
        assert_eq!(v.target(), 0.);
        assert_eq!(v.settle(), Some(Settle::SpringBack));

        clock.set_unadjusted(Duration::from_millis(100));
        assert_abs_diff_eq!(v.current(), 75., epsilon = 1e-9);
        assert!(v.is_animation_ongoing());
        assert_eq!(v.target(), 0.);
    }
}
