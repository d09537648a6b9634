//! Closed-form position analysis.
use crate::{point::*, Branch, CouplerPoint, LinkageSpec};

/// Positions of the four joints at one input angle.
///
/// Coordinates are in the ground frame, angles are in degrees in the range
/// (-180°, 180°].
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Joints `[A, B, C, D]`
    pub joints: [[f64; 2]; 4],
    /// Direction of the coupler link B→C
    pub coupler_angle: f64,
    /// Direction of the output link D→C
    pub output_angle: f64,
}

impl Pose {
    /// Ground pivot of the input crank.
    pub const fn a(&self) -> [f64; 2] {
        self.joints[0]
    }

    /// Joint of the input crank and the coupler.
    pub const fn b(&self) -> [f64; 2] {
        self.joints[1]
    }

    /// Joint of the coupler and the output link.
    pub const fn c(&self) -> [f64; 2] {
        self.joints[2]
    }

    /// Ground pivot of the output link.
    pub const fn d(&self) -> [f64; 2] {
        self.joints[3]
    }

    /// Position of a point rigidly attached to the coupler.
    pub fn coupler_point(&self, point: &CouplerPoint) -> [f64; 2] {
        let t = (self.coupler_angle + point.alpha()).to_radians();
        self.b().pla(point.e(), t)
    }
}

/// Solve the linkage at an input angle (degrees) in the chosen branch.
///
/// Return `None` if the linkage cannot be assembled at this angle, this is
/// an expected outcome for non-Grashof linkages, not a fault. A non-finite
/// input angle also gives `None`.
///
/// ```
/// use four_bar_kin::{solve, Branch, LinkageSpec};
/// let spec = LinkageSpec::new(100., 40., 120., 80.).unwrap();
/// let pose = solve(&spec, 0., Branch::Open).unwrap();
/// assert_eq!(pose.b(), [40., 0.]);
/// assert_eq!(pose.d(), [100., 0.]);
/// assert!(pose.c()[1] > 0.);
/// ```
pub fn solve(spec: &LinkageSpec, input: f64, branch: Branch) -> Option<Pose> {
    let p_a = [0., 0.];
    let p_d = [spec.d(), 0.];
    let p_b = p_a.pla(spec.a(), input.to_radians());
    let Some(p_c) = p_b.pllp(spec.b(), spec.c(), &p_d, branch.inv()) else {
        tracing::debug!(input, %branch, "unreachable configuration");
        return None;
    };
    let coupler_angle = wrap_deg(p_b.angle_to(&p_c).to_degrees());
    let output_angle = wrap_deg(p_d.angle_to(&p_c).to_degrees());
    let joints = [p_a, p_b, p_c, p_d];
    if !joints.iter().flatten().all(|x| x.is_finite()) {
        tracing::debug!(input, %branch, "non-finite joint position");
        return None;
    }
    tracing::trace!(input, %branch, coupler_angle, output_angle, "solved");
    Some(Pose { joints, coupler_angle, output_angle })
}

/// Output angle (degrees) by Freudenstein's equation.
///
/// Solves `A cos(t4) + B sin(t4) + C = 0` with
/// `A = 2c(d - a cos(t))`, `B = -2ac sin(t)`,
/// `C = d^2 + a^2 + c^2 - b^2 - 2ad cos(t)`,
/// which has the roots `t4 = atan2(B, A) ± acos(-C / sqrt(A^2 + B^2))`.
/// The positive root is the open branch. The result is the same as
/// [`Pose::output_angle`] from [`solve()`].
pub fn freudenstein(spec: &LinkageSpec, input: f64, branch: Branch) -> Option<f64> {
    let [d, a, b, c] = spec.planar_loop();
    let (sin, cos) = input.to_radians().sin_cos();
    let k_a = 2. * c * (d - a * cos);
    let k_b = -2. * a * c * sin;
    let k_c = d * d + a * a + c * c - b * b - 2. * a * d * cos;
    let r = k_a.hypot(k_b);
    if r < f64::EPSILON {
        return None;
    }
    let ratio = -k_c / r;
    // Round-off at tangency
    if !(-1. - 1e-12..=1. + 1e-12).contains(&ratio) {
        return None;
    }
    let psi = ratio.clamp(-1., 1.).acos();
    let psi = if branch.inv() { -psi } else { psi };
    Some(wrap_deg((k_b.atan2(k_a) + psi).to_degrees()))
}
