/// CSS-style cubic Bézier easing curve.
///
/// The curve starts at `(0, 0)` and ends at `(1, 1)`. The x coordinates of the control points are
/// restricted to `[0, 1]` so that the curve is a function of x; the y coordinates are not, which
/// allows curves that overshoot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    /// Overshoots slightly and settles back, `cubic-bezier(0.34, 1.56, 0.64, 1)`.
    pub const EASE_OUT_BACK: Self = Self {
        x1: 0.34,
        y1: 1.56,
        x2: 0.64,
        y2: 1.,
    };

    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.clamp(0., 1.),
            y1,
            x2: x2.clamp(0., 1.),
            y2,
        }
    }

    /// Returns the eased progress for a linear progress `x` in `[0, 1]`.
    pub fn y(&self, x: f64) -> f64 {
        if x <= 0. {
            return 0.;
        }
        if x >= 1. {
            return 1.;
        }

        let t = self.solve_t(x);
        sample(self.y1, self.y2, t)
    }

    fn solve_t(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;

        let mut t = x;
        for _ in 0..8 {
            let error = sample(self.x1, self.x2, t) - x;
            if error.abs() < EPSILON {
                return t;
            }

            let slope = sample_derivative(self.x1, self.x2, t);
            if slope.abs() < 1e-6 {
                break;
            }

            t = (t - error / slope).clamp(0., 1.);
        }

        // Newton didn't converge, the curve is too flat here. Bisect instead.
        let mut lo = 0.;
        let mut hi = 1.;
        t = x;
        for _ in 0..64 {
            let value = sample(self.x1, self.x2, t);
            if (value - x).abs() < EPSILON {
                break;
            }

            if value > x {
                hi = t;
            } else {
                lo = t;
            }
            t = (lo + hi) / 2.;
        }

        t
    }
}

/// One coordinate of the curve at parameter `t`, given the two control point coordinates.
fn sample(p1: f64, p2: f64, t: f64) -> f64 {
    let c = 3. * p1;
    let b = 3. * (p2 - p1) - c;
    let a = 1. - c - b;
    ((a * t + b) * t + c) * t
}

fn sample_derivative(p1: f64, p2: f64, t: f64) -> f64 {
    let c = 3. * p1;
    let b = 3. * (p2 - p1) - c;
    let a = 1. - c - b;
    (3. * a * t + 2. * b) * t + c
}
