//! Planar point operations used by the position analysis.
//!
//! The names follow the usual dyad notation: `pla` places a point by length
//! and angle, `plap` by length and angle relative to another point, and `pllp`
//! intersects two circles.

/// A point-like memory layout to achieve zero copy.
pub trait Point: Sized {
    /// Create a point from its coordinates.
    fn point(x: f64, y: f64) -> Self;
    /// X coordinate.
    fn x(&self) -> f64;
    /// Y coordinate.
    fn y(&self) -> f64;

    /// Distance to another point.
    fn dist(&self, rhs: &Self) -> f64 {
        (rhs.x() - self.x()).hypot(rhs.y() - self.y())
    }

    /// Direction angle (radians) from this point to another point.
    fn angle_to(&self, rhs: &Self) -> f64 {
        f64::atan2(rhs.y() - self.y(), rhs.x() - self.x())
    }

    /// The point at distance `d0` and angle `a0` (radians) from this point.
    fn pla(&self, d0: f64, a0: f64) -> Self {
        Self::point(self.x() + d0 * a0.cos(), self.y() + d0 * a0.sin())
    }

    /// The point at distance `d0` from this point, rotated by `a0` (radians)
    /// from the direction toward `rhs`.
    fn plap(&self, d0: f64, a0: f64, rhs: &Self) -> Self {
        self.pla(d0, self.angle_to(rhs) + a0)
    }

    /// Intersection of the circle `(self, d0)` and the circle `(rhs, d1)`.
    ///
    /// Without `inv` the result lies on the left side of the direction from
    /// this point to `rhs`, otherwise on the right side. Tangent circles give
    /// the same point for both sides.
    ///
    /// Return `None` if the circles do not intersect or are concentric.
    fn pllp(&self, d0: f64, d1: f64, rhs: &Self, inv: bool) -> Option<Self> {
        let dx = rhs.x() - self.x();
        let dy = rhs.y() - self.y();
        let d = dx.hypot(dy);
        if d > d0 + d1 || d < (d0 - d1).abs() || d < f64::EPSILON {
            return None;
        }
        let (ex, ey) = (dx / d, dy / d);
        let a = (d * d + d0 * d0 - d1 * d1) / (2. * d);
        // Round-off may push the chord height below zero at tangency
        let h = (d0 * d0 - a * a).max(0.).sqrt();
        let xm = self.x() + a * ex;
        let ym = self.y() + a * ey;
        if inv {
            Some(Self::point(xm + h * ey, ym - h * ex))
        } else {
            Some(Self::point(xm - h * ey, ym + h * ex))
        }
    }
}

impl Point for [f64; 2] {
    #[inline(always)]
    fn point(x: f64, y: f64) -> Self {
        [x, y]
    }
    #[inline(always)]
    fn x(&self) -> f64 {
        self[0]
    }
    #[inline(always)]
    fn y(&self) -> f64 {
        self[1]
    }
}

impl Point for (f64, f64) {
    #[inline(always)]
    fn point(x: f64, y: f64) -> Self {
        (x, y)
    }
    #[inline(always)]
    fn x(&self) -> f64 {
        self.0
    }
    #[inline(always)]
    fn y(&self) -> f64 {
        self.1
    }
}

/// Normalize an angle in degrees to the range (-180°, 180°].
pub fn wrap_deg(deg: f64) -> f64 {
    let w = deg.rem_euclid(360.);
    if w > 180. {
        w - 360.
    } else {
        w
    }
}

#[test]
fn pllp_sides() {
    use approx::assert_abs_diff_eq;
    let c = [0., 0.];
    let d = [2., 0.];
    let [lx, ly] = c.pllp(2f64.sqrt(), 2f64.sqrt(), &d, false).unwrap();
    assert_abs_diff_eq!(lx, 1., epsilon = 1e-12);
    assert_abs_diff_eq!(ly, 1., epsilon = 1e-12);
    let [rx, ry] = c.pllp(2f64.sqrt(), 2f64.sqrt(), &d, true).unwrap();
    assert_abs_diff_eq!(rx, 1., epsilon = 1e-12);
    assert_abs_diff_eq!(ry, -1., epsilon = 1e-12);
    assert!(c.pllp(0.5, 0.5, &d, false).is_none());
    assert!(c.pllp(5., 1., &d, false).is_none());
    assert!(c.pllp(1., 1., &c, false).is_none());
}

#[test]
fn wrap_range() {
    assert_eq!(wrap_deg(180.), 180.);
    assert_eq!(wrap_deg(-180.), 180.);
    assert_eq!(wrap_deg(540.), 180.);
    assert_eq!(wrap_deg(190.), -170.);
    assert_eq!(wrap_deg(-90.), -90.);
    assert_eq!(wrap_deg(0.), 0.);
}
