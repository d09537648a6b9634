/// Assembly branch of the linkage.
///
/// At a given input angle the coupler and the output link can close the loop
/// in two ways, one on each side of the diagonal from joint B to joint D.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "lowercase")
)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Branch {
    /// Elbow up, joint C on the left side of B→D
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "elbow-up", alias = "Open"))]
    #[cfg_attr(feature = "clap", value(alias = "elbow-up"))]
    Open,
    /// Elbow down, joint C on the right side of B→D
    #[cfg_attr(feature = "serde", serde(alias = "elbow-down", alias = "Closed"))]
    #[cfg_attr(feature = "clap", value(alias = "elbow-down"))]
    Closed,
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Open (elbow up)"),
            Self::Closed => write!(f, "Closed (elbow down)"),
        }
    }
}

/// Error for branch conversion.
#[derive(Debug)]
pub struct BranchError;

impl std::fmt::Display for BranchError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "invalid branch, expect \"open\" or \"closed\"")
    }
}

impl std::error::Error for BranchError {}

impl std::str::FromStr for Branch {
    type Err = BranchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" | "elbow-up" => Ok(Self::Open),
            "closed" | "elbow-down" => Ok(Self::Closed),
            _ => Err(BranchError),
        }
    }
}

impl Branch {
    /// Both branches.
    pub const ALL: [Self; 2] = [Self::Open, Self::Closed];

    /// Get the lowercase name.
    pub const fn name_lowercase(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Return `true` if the intersection is taken on the right side.
    pub const fn inv(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// The other branch.
    pub const fn other(&self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    /// Switch the branch.
    pub fn switch(&mut self) {
        *self = self.other();
    }
}

/// Input angle set where the linkage can be assembled, in degrees.
///
/// The set does not depend on the branch, since both intersections exist
/// exactly when the diagonal B-D can be bridged by the coupler and the output
/// link.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub enum AngleBound {
    /// The input link rotates fully
    Full,
    /// One interval `[start, end]`, the start may be negative
    Range([f64; 2]),
    /// Two disjoint intervals
    Split([[f64; 2]; 2]),
    /// Never assembled
    #[default]
    Never,
}

impl AngleBound {
    /// Name of the angle bound.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Full => "Full revolution",
            Self::Range(_) => "Limited range",
            Self::Split(_) => "Two separated ranges",
            Self::Never => "Never assembled",
        }
    }

    /// Check angle bound from a planar loop `[d, a, b, c]`.
    ///
    /// Uses `|b - c| <= |BD| <= b + c` where
    /// `|BD|^2 = a^2 + d^2 - 2ad cos(t)`.
    pub fn from_planar_loop(planar_loop: [f64; 4]) -> Self {
        let [d, a, b, c] = planar_loop;
        let numerator = a * a + d * d;
        let denominator = 2. * a * d;
        // Bounds of cos(t)
        let lo = (numerator - (b + c) * (b + c)) / denominator;
        let hi = (numerator - (b - c) * (b - c)) / denominator;
        if lo > 1. || hi < -1. {
            return Self::Never;
        }
        match (lo <= -1., hi >= 1.) {
            (true, true) => Self::Full,
            (true, false) => {
                let t = hi.acos().to_degrees();
                Self::Range([t, 360. - t])
            }
            (false, true) => {
                let t = lo.acos().to_degrees();
                Self::Range([-t, t])
            }
            (false, false) => {
                let t1 = hi.acos().to_degrees();
                let t2 = lo.acos().to_degrees();
                Self::Split([[t1, t2], [360. - t2, 360. - t1]])
            }
        }
    }

    /// Turn into intervals.
    pub fn to_ranges(self) -> Vec<[f64; 2]> {
        match self {
            Self::Full => vec![[0., 360.]],
            Self::Range(r) => vec![r],
            Self::Split([r1, r2]) => vec![r1, r2],
            Self::Never => Vec::new(),
        }
    }

    /// Return true if the input angle (degrees) is inside the bound.
    pub fn contains(&self, deg: f64) -> bool {
        const EPS: f64 = 1e-9;
        let in_range = |[start, end]: [f64; 2]| {
            (deg - start).rem_euclid(360.) <= end - start + EPS
                || (start - deg).rem_euclid(360.) <= EPS
        };
        match self {
            Self::Full => true,
            Self::Range(r) => in_range(*r),
            Self::Split([r1, r2]) => in_range(*r1) || in_range(*r2),
            Self::Never => false,
        }
    }

    /// Return true if the input link rotates fully.
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full)
    }

    /// Check if the linkage can be assembled at all.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Never)
    }
}

/// Type of the four-bar linkage.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub enum FourBarTy {
    /// Grashof double crank (Drag-link)
    GCCC,
    /// Grashof crank rocker
    GCRR,
    /// Grashof double rocker
    GRCR,
    /// Grashof rocker crank
    GRRC,
    /// Non-Grashof triple rocker (ground link is the longest)
    RRR1,
    /// Non-Grashof triple rocker (input link is the longest)
    RRR2,
    /// Non-Grashof triple rocker (coupler link is the longest)
    RRR3,
    /// Non-Grashof triple rocker (output link is the longest)
    RRR4,
    /// Invalid
    Invalid,
}

impl FourBarTy {
    /// Detect from four-bar loop `[d, a, b, c]`.
    ///
    /// A loop with a non-finite length is [`FourBarTy::Invalid`].
    pub fn from_loop(mut fb_loop: [f64; 4]) -> Self {
        if !fb_loop.iter().all(|x| x.is_finite()) {
            return Self::Invalid;
        }
        let [d, a, b, c] = fb_loop;
        fb_loop.sort_unstable_by(f64::total_cmp);
        let [s, p, q, l] = fb_loop;
        if l > s + p + q {
            return Self::Invalid;
        }
        macro_rules! arms {
            ($x:expr, $c1:expr, $c2:expr, $c3:expr, $c4:expr) => {
                match $x {
                    x if x == d => $c1,
                    x if x == a => $c2,
                    x if x == b => $c3,
                    x if x == c => $c4,
                    _ => Self::Invalid,
                }
            };
        }
        if s + l < p + q {
            arms!(s, Self::GCCC, Self::GCRR, Self::GRCR, Self::GRRC)
        } else {
            arms!(l, Self::RRR1, Self::RRR2, Self::RRR3, Self::RRR4)
        }
    }

    /// Name of the type.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GCCC => "Grashof double crank (Drag-link, GCCC)",
            Self::GCRR => "Grashof crank rocker (GCRR)",
            Self::GRCR => "Grashof double rocker (GRCR)",
            Self::GRRC => "Grashof rocker crank (GRRC)",
            Self::RRR1 => "Non-Grashof triple rocker (RRR1)",
            Self::RRR2 => "Non-Grashof triple rocker (RRR2)",
            Self::RRR3 => "Non-Grashof triple rocker (RRR3)",
            Self::RRR4 => "Non-Grashof triple rocker (RRR4)",
            Self::Invalid => "Invalid",
        }
    }

    /// Check if the type is valid.
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Return true if the type is Grashof linkage.
    pub const fn is_grashof(&self) -> bool {
        matches!(self, Self::GCCC | Self::GCRR | Self::GRCR | Self::GRRC)
    }

    /// Return true if the input link can rotate fully.
    pub const fn is_crank_input(&self) -> bool {
        matches!(self, Self::GCCC | Self::GCRR)
    }
}

impl std::fmt::Display for FourBarTy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[test]
fn planar_loop_types() {
    use FourBarTy::*;
    assert_eq!(FourBarTy::from_loop([90., 35., 70., 70.]), GCRR);
    assert_eq!(FourBarTy::from_loop([30., 60., 60., 75.]), GCCC);
    assert_eq!(FourBarTy::from_loop([80., 75., 25., 70.]), GRCR);
    assert_eq!(FourBarTy::from_loop([80., 75., 70., 25.]), GRRC);
    assert_eq!(FourBarTy::from_loop([85., 75., 65., 70.]), RRR1);
    assert_eq!(FourBarTy::from_loop([100., 200., 50., 50.]), RRR2);
    assert_eq!(FourBarTy::from_loop([100., 300., 50., 50.]), Invalid);
    assert_eq!(FourBarTy::from_loop([f64::NAN, 1., 1., 1.]), Invalid);
    assert_eq!(FourBarTy::from_loop([1., 1., f64::INFINITY, 1.]), Invalid);
    assert!(!RRR2.is_grashof());
    assert!(GCRR.is_crank_input());
}

#[test]
fn angle_bounds() {
    use approx::assert_abs_diff_eq;
    // Crank rocker
    assert_eq!(AngleBound::from_planar_loop([90., 35., 70., 70.]), AngleBound::Full);
    // Input link too long to pass the ground pivot: |BD| <= b + c fails near 180°
    let AngleBound::Range([start, end]) = AngleBound::from_planar_loop([100., 200., 50., 50.])
    else {
        panic!("expect a range");
    };
    assert_abs_diff_eq!(start, 0., epsilon = 1e-6);
    assert_abs_diff_eq!(end, 0., epsilon = 1e-6);
    // Rocker input, both limits are reached
    let bound = AngleBound::from_planar_loop([85., 75., 65., 20.]);
    let AngleBound::Split([[s1, e1], [s2, e2]]) = bound else {
        panic!("expect two ranges");
    };
    assert_abs_diff_eq!(s1, 360. - e2, epsilon = 1e-9);
    assert_abs_diff_eq!(e1, 360. - s2, epsilon = 1e-9);
    assert!(bound.contains(45.));
    assert!(bound.contains(-45.));
    assert!(!bound.contains(0.));
    assert!(!bound.contains(180.));
    assert_eq!(AngleBound::from_planar_loop([100., 10., 10., 10.]), AngleBound::Never);
}

#[test]
fn branch_parse() {
    assert_eq!("open".parse::<Branch>().unwrap(), Branch::Open);
    assert_eq!("Elbow-Down".parse::<Branch>().unwrap(), Branch::Closed);
    assert!("up".parse::<Branch>().is_err());
    let mut b = Branch::Open;
    b.switch();
    assert_eq!(b, Branch::Closed);
    assert!(b.inv());
}
