use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Shareable clock driven by the host.
///
/// The host feeds it event and frame timestamps with [`Clock::set_unadjusted`]. Animations read
/// the adjusted time from [`Clock::now`], which advances at [`Clock::rate`] relative to the
/// unadjusted time.
#[derive(Debug, Default, Clone)]
pub struct Clock {
    inner: Rc<RefCell<AdjustableClock>>,
}

#[derive(Debug)]
struct AdjustableClock {
    unadjusted: Duration,
    current_time: Duration,
    rate: f64,
    complete_instantly: bool,
}

impl Default for AdjustableClock {
    fn default() -> Self {
        Self {
            unadjusted: Duration::ZERO,
            current_time: Duration::ZERO,
            rate: 1.,
            complete_instantly: false,
        }
    }
}

impl Clock {
    /// Creates a clock starting at the given time.
    pub fn with_time(time: Duration) -> Self {
        let clock = Self::default();
        {
            let mut inner = clock.inner.borrow_mut();
            inner.unadjusted = time;
            inner.current_time = time;
        }
        clock
    }

    /// Advances the clock to the given unadjusted time.
    ///
    /// Timestamps earlier than the last seen one are ignored, the clock never goes backwards.
    pub fn set_unadjusted(&self, time: Duration) {
        let mut inner = self.inner.borrow_mut();

        let Some(delta) = time.checked_sub(inner.unadjusted) else {
            trace!(
                "ignoring time {time:?} earlier than last {:?}",
                inner.unadjusted
            );
            return;
        };

        let rate = inner.rate;
        inner.current_time += delta.mul_f64(rate);
        inner.unadjusted = time;
    }

    /// Returns the last time passed to [`Clock::set_unadjusted`].
    pub fn now_unadjusted(&self) -> Duration {
        self.inner.borrow().unadjusted
    }

    /// Returns the rate-adjusted current time.
    pub fn now(&self) -> Duration {
        self.inner.borrow().current_time
    }

    pub fn rate(&self) -> f64 {
        self.inner.borrow().rate
    }

    /// Sets the rate at which the adjusted time advances.
    ///
    /// The rate is clamped to `[0, 1000]`.
    pub fn set_rate(&self, rate: f64) {
        let rate = if rate.is_finite() { rate } else { 1. };
        self.inner.borrow_mut().rate = rate.clamp(0., 1000.);
    }

    pub fn should_complete_instantly(&self) -> bool {
        self.inner.borrow().complete_instantly
    }

    pub fn set_complete_instantly(&self, value: bool) {
        self.inner.borrow_mut().complete_instantly = value;
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Clock {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_with_rate() {
        let clock = Clock::default();
        clock.set_unadjusted(Duration::from_millis(100));
        assert_eq!(clock.now(), Duration::from_millis(100));

        clock.set_rate(0.5);
        clock.set_unadjusted(Duration::from_millis(300));
        assert_eq!(clock.now_unadjusted(), Duration::from_millis(300));
        assert_eq!(clock.now(), Duration::from_millis(200));
    }

    #[test]
    fn never_goes_backwards() {
        let clock = Clock::with_time(Duration::from_secs(5));
        clock.set_unadjusted(Duration::from_secs(4));
        assert_eq!(clock.now(), Duration::from_secs(5));
        assert_eq!(clock.now_unadjusted(), Duration::from_secs(5));
    }

    #[test]
    fn zero_rate_freezes_time() {
        let clock = Clock::default();
        clock.set_rate(0.);
        clock.set_unadjusted(Duration::from_secs(10));
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[test]
    fn clones_share_time() {
        let clock = Clock::default();
        let other = clock.clone();
        clock.set_unadjusted(Duration::from_millis(42));
        assert_eq!(other.now(), Duration::from_millis(42));
        assert_eq!(clock, other);
        assert_ne!(clock, Clock::default());
    }
}
