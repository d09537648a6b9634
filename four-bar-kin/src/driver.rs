//! Animation driver.
//!
//! The driver owns the current input angle; each tick solves the linkage
//! once and advances the angle. Nothing else is kept between ticks.
use crate::{error::*, solve, Branch, CouplerPoint, LinkageSpec, Pose};

/// One solved animation frame.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Input angle in degrees
    pub angle: f64,
    /// Joint positions, `None` if unsolvable
    pub pose: Option<Pose>,
    /// Coupler point position, `None` if unsolvable
    pub point: Option<[f64; 2]>,
}

/// Advance the input angle through 0° to 360° (inclusive) repeatedly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Driver {
    current: f64,
    step: f64,
}

impl Default for Driver {
    fn default() -> Self {
        Self { current: 0., step: 1. }
    }
}

impl Driver {
    /// Create a driver from a start angle and an increment, in degrees.
    pub fn new(start: f64, step: f64) -> Result<Self> {
        if !(step.is_finite() && step > 0.) {
            return Err(Error::InvalidStep(step));
        }
        Ok(Self { current: check_angle(start)?.rem_euclid(361.), step })
    }

    /// The angle of the next frame.
    pub const fn current(&self) -> f64 {
        self.current
    }

    /// Solve the current angle then advance.
    pub fn tick(&mut self, spec: &LinkageSpec, point: &CouplerPoint, branch: Branch) -> Frame {
        let angle = self.current;
        let pose = solve(spec, angle, branch);
        let point = pose.map(|pose| pose.coupler_point(point));
        self.current = (self.current + self.step) % 361.;
        Frame { angle, pose, point }
    }

    /// Generate `n` frames.
    pub fn frames<'a>(
        &'a mut self,
        spec: &'a LinkageSpec,
        point: &'a CouplerPoint,
        branch: Branch,
        n: usize,
    ) -> impl Iterator<Item = Frame> + 'a {
        (0..n).map(move |_| self.tick(spec, point, branch))
    }
}

#[test]
fn driver_wraps() {
    let spec = LinkageSpec::example();
    let point = CouplerPoint::example();
    let mut driver = Driver::new(359., 1.).unwrap();
    let angles = driver
        .frames(&spec, &point, Branch::Open, 3)
        .map(|f| f.angle)
        .collect::<Vec<_>>();
    assert_eq!(angles, [359., 360., 0.]);
    assert_eq!(driver.current(), 1.);
    assert!(Driver::new(0., 0.).is_err());
}
