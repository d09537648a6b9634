//! Numerical position analysis by Newton-Raphson iteration.
//!
//! The vector loop `a e^(it) + b e^(i t3) - c e^(i t4) - d = 0` is solved for
//! the coupler angle `t3` and the output angle `t4`. The branch is decided by
//! the initial guess, so a sweep reuses the previous solution as the next
//! guess (continuation) to stay on one branch.
use crate::{point::*, LinkageSpec, Pose};

/// Newton-Raphson solver of the vector loop equation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewtonSolver {
    /// Residual tolerance relative to the longest link
    pub tol: f64,
    /// Maximum number of iterations
    pub max_iter: usize,
}

impl Default for NewtonSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl NewtonSolver {
    /// Create a solver with default tolerance.
    pub const fn new() -> Self {
        Self { tol: 1e-12, max_iter: 50 }
    }

    /// Set the tolerance.
    pub const fn tol(self, tol: f64) -> Self {
        Self { tol, ..self }
    }

    /// Set the maximum number of iterations.
    pub const fn max_iter(self, max_iter: usize) -> Self {
        Self { max_iter, ..self }
    }

    /// Solve `[coupler_angle, output_angle]` (degrees) at an input angle
    /// (degrees) from a guess (degrees).
    ///
    /// Return `None` if the iteration does not converge or the Jacobian
    /// becomes singular (the coupler and the output link are collinear).
    pub fn solve(&self, spec: &LinkageSpec, input: f64, guess: [f64; 2]) -> Option<[f64; 2]> {
        let [d, a, b, c] = spec.planar_loop();
        let scale = d.max(a).max(b).max(c);
        let (sin, cos) = input.to_radians().sin_cos();
        let [mut t3, mut t4] = guess.map(f64::to_radians);
        for _ in 0..self.max_iter {
            let (s3, c3) = t3.sin_cos();
            let (s4, c4) = t4.sin_cos();
            let f1 = a * cos + b * c3 - c * c4 - d;
            let f2 = a * sin + b * s3 - c * s4;
            if f1.hypot(f2) <= self.tol * scale {
                return Some([wrap_deg(t3.to_degrees()), wrap_deg(t4.to_degrees())]);
            }
            // Jacobian [[p, q], [r, s]]
            let (p, q) = (-b * s3, c * s4);
            let (r, s) = (b * c3, -c * c4);
            let det = p * s - q * r;
            if det.abs() < f64::EPSILON * scale * scale {
                tracing::debug!(input, "singular jacobian");
                return None;
            }
            t3 -= (s * f1 - q * f2) / det;
            t4 -= (p * f2 - r * f1) / det;
            if !(t3.is_finite() && t4.is_finite()) {
                return None;
            }
        }
        tracing::debug!(input, max_iter = self.max_iter, "newton iteration not converged");
        None
    }

    /// Solve the joint positions like [`crate::solve()`], with the branch
    /// chosen by the guess.
    pub fn pose(&self, spec: &LinkageSpec, input: f64, guess: [f64; 2]) -> Option<Pose> {
        let [coupler_angle, output_angle] = self.solve(spec, input, guess)?;
        let p_a = [0., 0.];
        let p_d = [spec.d(), 0.];
        let p_b = p_a.pla(spec.a(), input.to_radians());
        let p_c = p_d.pla(spec.c(), output_angle.to_radians());
        Some(Pose { joints: [p_a, p_b, p_c, p_d], coupler_angle, output_angle })
    }

    /// Solve a sequence of input angles, each solution is the guess of the
    /// next angle.
    ///
    /// A failed sample gives `None` and the last good solution stays the
    /// guess.
    pub fn continuation<I>(
        &self,
        spec: &LinkageSpec,
        inputs: I,
        guess: [f64; 2],
    ) -> Vec<Option<[f64; 2]>>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut guess = guess;
        inputs
            .into_iter()
            .map(|t| {
                let ans = self.solve(spec, t, guess);
                if let Some(ans) = ans {
                    guess = ans;
                }
                ans
            })
            .collect()
    }
}
