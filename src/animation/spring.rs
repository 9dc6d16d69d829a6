use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub damping: f64,
    pub mass: f64,
    pub stiffness: f64,
    pub epsilon: f64,
}

/// Damped harmonic oscillator moving from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub from: f64,
    pub to: f64,
    pub initial_velocity: f64,
    pub params: SpringParams,
}

impl SpringParams {
    pub fn new(damping_ratio: f64, stiffness: f64, epsilon: f64) -> Self {
        let damping_ratio = damping_ratio.max(0.);
        let stiffness = stiffness.max(0.);
        let epsilon = epsilon.max(0.);

        let mass = 1.;
        let critical_damping = 2. * (mass * stiffness).sqrt();
        let damping = damping_ratio * critical_damping;

        Self {
            damping,
            mass,
            stiffness,
            epsilon,
        }
    }
}

impl Spring {
    pub fn value_at(&self, t: Duration) -> f64 {
        self.oscillate(t.as_secs_f64())
    }

    /// Time until the spring stays within `epsilon` of the target.
    ///
    /// Returns `None` for springs that never settle, like undamped ones or a zero epsilon.
    pub fn duration(&self) -> Option<Duration> {
        const DELTA: f64 = 0.001;

        let beta = self.params.damping / (2. * self.params.mass);

        if beta <= f64::EPSILON {
            return None;
        }

        if (self.to - self.from).abs() <= f64::EPSILON {
            return Some(Duration::ZERO);
        }

        let omega0 = (self.params.stiffness / self.params.mass).sqrt();

        // The envelope bounds oscillating solutions, so the time it drops below epsilon is a good
        // estimate for them and a starting point for the overdamped case.
        let mut x0 = -self.params.epsilon.ln() / beta;
        if !x0.is_finite() {
            return None;
        }

        if (beta - omega0).abs() <= f64::from(f32::EPSILON) || beta < omega0 {
            return Duration::try_from_secs_f64(x0.max(0.)).ok();
        }

        // Overdamped springs decay much slower than their envelope, so find the settle time with
        // Newton's method on the solution itself.
        let mut y0 = self.oscillate(x0);
        let m = (self.oscillate(x0 + DELTA) - y0) / DELTA;
        let mut x1 = (self.to - y0 + m * x0) / m;
        let mut y1 = self.oscillate(x1);

        let mut i = 0;
        while (self.to - y1).abs() > self.params.epsilon {
            if i > 1000 {
                return Some(Duration::ZERO);
            }

            x0 = x1;
            y0 = y1;

            let m = (self.oscillate(x0 + DELTA) - y0) / DELTA;
            x1 = (self.to - y0 + m * x0) / m;
            y1 = self.oscillate(x1);
            i += 1;
        }

        Duration::try_from_secs_f64(x1.max(0.)).ok()
    }

    /// Solves `m·x″ + b·x′ + k·x = 0` for the displacement from `to` at time `t`.
    fn oscillate(&self, t: f64) -> f64 {
        let b = self.params.damping;
        let m = self.params.mass;
        let k = self.params.stiffness;
        let v0 = self.initial_velocity;

        let beta = b / (2. * m);
        let omega0 = (k / m).sqrt();

        let x0 = self.from - self.to;

        let envelope = (-beta * t).exp();

        if (beta - omega0).abs() <= f64::from(f32::EPSILON) {
            // Critically damped.
            self.to + envelope * (x0 + (beta * x0 + v0) * t)
        } else if beta < omega0 {
            // Underdamped.
            let omega1 = ((omega0 * omega0) - (beta * beta)).sqrt();

            self.to
                + envelope
                    * (x0 * (omega1 * t).cos() + ((beta * x0 + v0) / omega1) * (omega1 * t).sin())
        } else {
            // Overdamped.
            let omega2 = ((beta * beta) - (omega0 * omega0)).sqrt();

            self.to
                + envelope
                    * (x0 * (omega2 * t).cosh()
                        + ((beta * x0 + v0) / omega2) * (omega2 * t).sinh())
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn spring(damping_ratio: f64) -> Spring {
        Spring {
            from: 0.,
            to: 1.,
            initial_velocity: 0.,
            params: SpringParams::new(damping_ratio, 800., 0.0001),
        }
    }

    #[test]
    fn starts_at_from_and_settles_at_to() {
        for damping_ratio in [0.5, 1., 2.] {
            let spring = spring(damping_ratio);
            assert_abs_diff_eq!(spring.value_at(Duration::ZERO), 0., epsilon = 1e-9);

            let duration = spring.duration().unwrap();
            assert!(duration > Duration::ZERO);
            assert_abs_diff_eq!(spring.value_at(duration), 1., epsilon = 2e-3);
        }
    }

    #[test]
    fn underdamped_overshoots() {
        let spring = spring(0.5);
        let duration = spring.duration().unwrap();

        let peak = (1..duration.as_millis() as u64)
            .map(|ms| spring.value_at(Duration::from_millis(ms)))
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(peak > 1.);
    }

    #[test]
    fn overdamped_never_reaches_target_early() {
        let spring = spring(2.);
        for ms in [10, 50, 100] {
            assert!(spring.value_at(Duration::from_millis(ms)) < 1.);
        }
    }

    #[test]
    fn undamped_never_settles() {
        let spring = spring(0.);
        assert_eq!(spring.duration(), None);
    }

    #[test]
    fn zero_epsilon_never_settles() {
        let mut spring = spring(1.);
        spring.params.epsilon = 0.;
        assert_eq!(spring.duration(), None);
    }

    #[test]
    fn in_place_is_instant() {
        let mut spring = spring(1.);
        spring.to = spring.from;
        assert_eq!(spring.duration(), Some(Duration::ZERO));
    }
}
