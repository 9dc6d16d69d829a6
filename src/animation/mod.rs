//! Time-based animations driven by a shared [`Clock`].

use std::time::Duration;

use keyframe::functions::{EaseOutCubic, EaseOutQuad};
use keyframe::EasingFunction;

mod bezier;
pub use bezier::CubicBezier;

mod clock;
pub use clock::Clock;

mod spring;
pub use spring::{Spring, SpringParams};

#[derive(Debug, Clone)]
pub struct Animation {
    from: f64,
    to: f64,
    duration: Duration,
    start_time: Duration,
    clock: Clock,
    kind: Kind,
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Easing { curve: Curve },
    Spring(Spring),
}

/// Cap for springs that never settle within their epsilon.
const MAX_SPRING_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseOutExpo,
    CubicBezier(CubicBezier),
}

impl Animation {
    pub fn new(
        clock: Clock,
        from: f64,
        to: f64,
        initial_velocity: f64,
        config: overscroll_nav_config::Animation,
    ) -> Self {
        // Keep the release velocity in adjusted time so slowed-down springs don't start too fast.
        let initial_velocity = initial_velocity / clock.rate().max(0.001);

        if config.off {
            return Self::ease(clock, from, to, 0, Curve::EaseOutCubic);
        }

        match config.kind {
            overscroll_nav_config::AnimationKind::Spring(p) => {
                let params = SpringParams::new(p.damping_ratio, f64::from(p.stiffness), p.epsilon);
                let spring = Spring {
                    from,
                    to,
                    initial_velocity,
                    params,
                };
                Self::spring(clock, spring)
            }
            overscroll_nav_config::AnimationKind::Easing(p) => Self::ease(
                clock,
                from,
                to,
                u64::from(p.duration_ms),
                Curve::from(p.curve),
            ),
        }
    }

    pub fn ease(clock: Clock, from: f64, to: f64, duration_ms: u64, curve: Curve) -> Self {
        let duration = Duration::from_millis(duration_ms);
        let kind = Kind::Easing { curve };
        let start_time = clock.now();

        Self {
            from,
            to,
            duration,
            start_time,
            clock,
            kind,
        }
    }

    pub fn spring(clock: Clock, spring: Spring) -> Self {
        let duration = spring.duration().unwrap_or_else(|| {
            warn!("spring never settles, capping it at {MAX_SPRING_DURATION:?}");
            MAX_SPRING_DURATION
        });
        let kind = Kind::Spring(spring);
        let start_time = clock.now();

        Self {
            from: spring.from,
            to: spring.to,
            duration,
            start_time,
            clock,
            kind,
        }
    }

    pub fn is_done(&self) -> bool {
        if self.clock.should_complete_instantly() {
            return true;
        }

        self.clock.now() >= self.end_time()
    }

    pub fn value(&self) -> f64 {
        if self.is_done() {
            return self.to;
        }

        let passed = self.clock.now().saturating_sub(self.start_time);

        match self.kind {
            Kind::Easing { curve } => {
                let total = self.duration.as_secs_f64();
                let x = if total > 0. {
                    (passed.as_secs_f64() / total).clamp(0., 1.)
                } else {
                    1.
                };
                curve.y(x) * (self.to - self.from) + self.from
            }
            Kind::Spring(spring) => {
                let value = spring.value_at(passed);

                // Guard against runaway values from numerical instability.
                let range = (self.to - self.from) * 10.;
                let a = self.from - range;
                let b = self.to + range;
                if self.from <= self.to {
                    value.clamp(a, b)
                } else {
                    value.clamp(b, a)
                }
            }
        }
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn end_time(&self) -> Duration {
        self.start_time.saturating_add(self.duration)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn curve(&self) -> Option<Curve> {
        match self.kind {
            Kind::Easing { curve } => Some(curve),
            Kind::Spring(_) => None,
        }
    }
}

impl Curve {
    pub fn y(self, x: f64) -> f64 {
        match self {
            Curve::Linear => x,
            Curve::EaseOutQuad => EaseOutQuad.y(x),
            Curve::EaseOutCubic => EaseOutCubic.y(x),
            Curve::EaseOutExpo => 1. - 2f64.powf(-10. * x),
            Curve::CubicBezier(bezier) => bezier.y(x),
        }
    }

    /// Name of the curve as written in the config.
    pub fn name(self) -> &'static str {
        match self {
            Curve::Linear => "linear",
            Curve::EaseOutQuad => "ease-out-quad",
            Curve::EaseOutCubic => "ease-out-cubic",
            Curve::EaseOutExpo => "ease-out-expo",
            Curve::CubicBezier(bezier) if bezier == CubicBezier::EASE_OUT_BACK => "ease-out-back",
            Curve::CubicBezier(_) => "cubic-bezier",
        }
    }
}

impl From<overscroll_nav_config::AnimationCurve> for Curve {
    fn from(value: overscroll_nav_config::AnimationCurve) -> Self {
        use overscroll_nav_config::AnimationCurve;

        match value {
            AnimationCurve::Linear => Curve::Linear,
            AnimationCurve::EaseOutQuad => Curve::EaseOutQuad,
            AnimationCurve::EaseOutCubic => Curve::EaseOutCubic,
            AnimationCurve::EaseOutExpo => Curve::EaseOutExpo,
            AnimationCurve::EaseOutBack => Curve::CubicBezier(CubicBezier::EASE_OUT_BACK),
            AnimationCurve::CubicBezier(b) => {
                Curve::CubicBezier(CubicBezier::new(b.x1, b.y1, b.x2, b.y2))
            }
        }
    }
}
