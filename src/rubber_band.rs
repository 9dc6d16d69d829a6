/// Exponential rubber band.
///
/// Maps a raw drag distance to a displayed distance that grows quickly at first and then
/// approaches `limit` without ever reaching it, so dragging further gives less and less visible
/// movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RubberBand {
    /// Fraction of `limit` over which the band reaches `1 - 1/e` of the limit.
    ///
    /// Lower values make the band stiffer.
    pub stiffness: f64,
    pub limit: f64,
}

impl RubberBand {
    pub const DEFAULT_STIFFNESS: f64 = 0.6;

    pub fn new(limit: f64) -> Self {
        Self {
            stiffness: Self::DEFAULT_STIFFNESS,
            limit,
        }
    }

    /// Damped distance for a raw distance `x`.
    ///
    /// Returns 0 for non-positive `x`.
    pub fn band(&self, x: f64) -> f64 {
        if x <= 0. || self.limit <= 0. {
            return 0.;
        }

        let scale = self.stiffness * self.limit;
        let y = self.limit * -(-x / scale).exp_m1();

        // Far enough out the exponential rounds to exactly `limit`.
        y.min(self.limit * (1. - f64::EPSILON))
    }

    /// Derivative of [`RubberBand::band`] with respect to the raw distance.
    pub fn derivative(&self, x: f64) -> f64 {
        if x < 0. || self.limit <= 0. {
            return 0.;
        }

        let scale = self.stiffness * self.limit;
        (-x / scale).exp() / self.stiffness
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn known_values() {
        let band = RubberBand::new(250.);
        assert_eq!(band.band(0.), 0.);
        assert_eq!(band.band(-10.), 0.);
        assert_abs_diff_eq!(band.band(150.), 250. * (1. - (-1f64).exp()), epsilon = 1e-9);
        assert_abs_diff_eq!(band.band(150.), 158.03, epsilon = 0.01);
        assert_abs_diff_eq!(band.band(50.), 70.87, epsilon = 0.01);
    }

    #[test]
    fn extreme_drags_stay_below_limit() {
        let band = RubberBand::new(250.);
        for x in [10_000., 1e9, f64::MAX] {
            let y = band.band(x);
            assert!(y < 250., "{x} -> {y}");
            assert!(y > 249.);
        }
    }

    #[test]
    fn derivative_matches_slope() {
        let band = RubberBand::new(250.);
        for x in [0., 10., 100., 400.] {
            let h = 1e-4;
            let numeric = (band.band(x + h) - band.band(x)) / h;
            assert_abs_diff_eq!(band.derivative(x), numeric, epsilon = 1e-3);
        }
    }

    proptest! {
        #[test]
        fn band_stays_in_range(x in 0f64..1e12, limit in 1f64..10_000.) {
            let band = RubberBand::new(limit);
            let y = band.band(x);
            prop_assert!(y >= 0.);
            prop_assert!(y < limit);
        }

        #[test]
        fn band_is_monotonic(a in 0f64..10_000., b in 0f64..10_000., limit in 1f64..10_000.) {
            let band = RubberBand::new(limit);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(band.band(lo) <= band.band(hi));
        }

        #[test]
        fn band_is_concave(x in 0f64..5_000., d in 0.1f64..100., limit in 1f64..10_000.) {
            let band = RubberBand::new(limit);
            let first = band.band(x + d) - band.band(x);
            let second = band.band(x + 2. * d) - band.band(x + d);
            prop_assert!(second <= first + 1e-9);
        }
    }
}
