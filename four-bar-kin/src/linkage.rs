//! Linkage dimensions and the coupler point.
use crate::{error::*, AngleBound, FourBarTy};

/// Link lengths of a planar four-bar linkage.
///
/// The ground link defines the fixed frame: the input pivot A is at the
/// origin and the output pivot D is at `(d, 0)`.
///
/// # Parameters
///
/// + Ground link `d`
/// + Input crank `a`
/// + Coupler link `b`
/// + Output link `c`
///
/// All lengths are positive and finite; they are not checked against the
/// Grashof condition.
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "RawLinkage")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkageSpec {
    d: f64,
    a: f64,
    b: f64,
    c: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawLinkage {
    d: f64,
    a: f64,
    b: f64,
    c: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLinkage> for LinkageSpec {
    type Error = Error;

    fn try_from(RawLinkage { d, a, b, c }: RawLinkage) -> Result<Self> {
        Self::new(d, a, b, c)
    }
}

impl LinkageSpec {
    /// Create a new instance with checked lengths.
    ///
    /// ```
    /// use four_bar_kin::LinkageSpec;
    /// assert!(LinkageSpec::new(100., 40., 120., 80.).is_ok());
    /// assert!(LinkageSpec::new(100., 0., 120., 80.).is_err());
    /// ```
    pub fn new(d: f64, a: f64, b: f64, c: f64) -> Result<Self> {
        Ok(Self {
            d: check_length("d", d)?,
            a: check_length("a", a)?,
            b: check_length("b", b)?,
            c: check_length("c", c)?,
        })
    }

    /// An example crank rocker.
    pub const fn example() -> Self {
        Self { d: 90., a: 35., b: 70., c: 70. }
    }

    /// Length of the ground link.
    pub const fn d(&self) -> f64 {
        self.d
    }

    /// Length of the input crank.
    pub const fn a(&self) -> f64 {
        self.a
    }

    /// Length of the coupler link.
    pub const fn b(&self) -> f64 {
        self.b
    }

    /// Length of the output link.
    pub const fn c(&self) -> f64 {
        self.c
    }

    /// The planar loop `[d, a, b, c]`.
    pub const fn planar_loop(&self) -> [f64; 4] {
        [self.d, self.a, self.b, self.c]
    }

    /// Return the type of this linkage.
    pub fn ty(&self) -> FourBarTy {
        FourBarTy::from_loop(self.planar_loop())
    }

    /// Input angle bounds of the linkage.
    pub fn angle_bound(&self) -> AngleBound {
        AngleBound::from_planar_loop(self.planar_loop())
    }
}

impl Default for LinkageSpec {
    fn default() -> Self {
        Self::example()
    }
}

/// A point rigidly attached to the coupler link.
///
/// The point is at distance `e` from joint B, rotated by `alpha` degrees
/// (counterclockwise) from the coupler direction B→C.
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "RawCouplerPoint")
)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CouplerPoint {
    e: f64,
    alpha: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCouplerPoint {
    #[serde(default)]
    e: f64,
    #[serde(default)]
    alpha: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCouplerPoint> for CouplerPoint {
    type Error = Error;

    fn try_from(RawCouplerPoint { e, alpha }: RawCouplerPoint) -> Result<Self> {
        Self::new(e, alpha)
    }
}

impl CouplerPoint {
    /// Create a new instance with checked offset and angle.
    pub fn new(e: f64, alpha: f64) -> Result<Self> {
        if !(e.is_finite() && e >= 0.) {
            return Err(Error::InvalidOffset(e));
        }
        Ok(Self { e, alpha: check_angle(alpha)? })
    }

    /// The coupler point of [`LinkageSpec::example()`].
    pub const fn example() -> Self {
        Self { e: 45., alpha: 30. }
    }

    /// Distance from joint B.
    pub const fn e(&self) -> f64 {
        self.e
    }

    /// Angle from the coupler direction, in degrees.
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }
}

#[test]
fn checked_inputs() {
    assert_eq!(
        LinkageSpec::new(1., -2., 1., 1.),
        Err(Error::InvalidLength { name: "a", value: -2. })
    );
    assert!(LinkageSpec::new(f64::NAN, 1., 1., 1.).is_err());
    assert!(LinkageSpec::new(1., 1., f64::INFINITY, 1.).is_err());
    assert!(CouplerPoint::new(0., 0.).is_ok());
    assert_eq!(CouplerPoint::new(-1., 0.), Err(Error::InvalidOffset(-1.)));
    assert!(matches!(
        CouplerPoint::new(1., f64::NAN),
        Err(Error::InvalidAngle(_))
    ));
}

#[cfg(feature = "serde")]
#[test]
fn deserialize_checked() {
    let spec = ron::from_str::<LinkageSpec>("(d: 100., a: 40., b: 120., c: 80.)").unwrap();
    assert_eq!(spec.planar_loop(), [100., 40., 120., 80.]);
    assert!(ron::from_str::<LinkageSpec>("(d: 100., a: 0., b: 120., c: 80.)").is_err());
    let point = ron::from_str::<CouplerPoint>("(e: 10.)").unwrap();
    assert_eq!(point, CouplerPoint::new(10., 0.).unwrap());
    assert!(ron::from_str::<CouplerPoint>("(e: -1.)").is_err());
}
