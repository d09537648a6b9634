//! Coupler curve and angle curves over an input angle sweep.
use crate::{error::*, solve, Branch, CouplerPoint, LinkageSpec, Pose};
use std::ops::Range;

/// Default sampling step of the input angle, in degrees.
pub const DEFAULT_STEP: f64 = 2.;

const EPS: f64 = 1e-9;

/// Result of a sweep.
///
/// Only the solvable samples are recorded, the vectors have the same length
/// and are ordered by the input angle. Unsolvable samples leave gaps, see
/// [`Locus::segments()`].
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Locus {
    /// Sampling step in degrees
    pub step: f64,
    /// Number of sampled input angles, including the unsolvable ones
    pub samples: usize,
    /// Coupler point positions
    pub trajectory: Vec<[f64; 2]>,
    /// Input angles
    pub input_angles: Vec<f64>,
    /// Coupler angles
    pub coupler_angles: Vec<f64>,
    /// Output angles
    pub output_angles: Vec<f64>,
}

impl Locus {
    fn with_capacity(step: f64, cap: usize) -> Self {
        Self {
            step,
            samples: 0,
            trajectory: Vec::with_capacity(cap),
            input_angles: Vec::with_capacity(cap),
            coupler_angles: Vec::with_capacity(cap),
            output_angles: Vec::with_capacity(cap),
        }
    }

    fn push(&mut self, input: f64, pose: &Pose, point: &CouplerPoint) {
        self.trajectory.push(pose.coupler_point(point));
        self.input_angles.push(input);
        self.coupler_angles.push(pose.coupler_angle);
        self.output_angles.push(pose.output_angle);
    }

    /// Number of solvable samples.
    pub fn len(&self) -> usize {
        self.input_angles.len()
    }

    /// Return true if no sample is solvable.
    pub fn is_empty(&self) -> bool {
        self.input_angles.is_empty()
    }

    /// Number of unsolvable samples.
    ///
    /// Zero if the record holds more solved samples than `samples`.
    pub fn gaps(&self) -> usize {
        self.samples.saturating_sub(self.len())
    }

    /// Iterate `(input, coupler, output, point)` of each solvable sample.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, f64, [f64; 2])> + '_ {
        self.input_angles
            .iter()
            .zip(&self.coupler_angles)
            .zip(&self.output_angles)
            .zip(&self.trajectory)
            .map(|(((i, c), o), p)| (*i, *c, *o, *p))
    }

    /// Index ranges of the consecutive solvable samples.
    ///
    /// A new segment starts after each gap, so drawing a line inside a
    /// segment never bridges an unsolvable input angle.
    pub fn segments(&self) -> Vec<Range<usize>> {
        let mut segments = Vec::new();
        let mut start = 0;
        for (i, w) in self.input_angles.windows(2).enumerate() {
            if w[1] - w[0] > self.step * 1.5 {
                segments.push(start..i + 1);
                start = i + 1;
            }
        }
        if !self.is_empty() {
            segments.push(start..self.len());
        }
        segments
    }

    /// The coupler point positions split at the gaps.
    pub fn trajectory_segments(&self) -> Vec<&[[f64; 2]]> {
        self.segments()
            .into_iter()
            .map(|r| &self.trajectory[r])
            .collect()
    }

    /// Unwrap the coupler and output angles.
    ///
    /// The raw angles jump between -180° and 180°. Inside each segment, the
    /// unwrapped angles add multiples of 360° so that consecutive samples
    /// differ by less than 180°. The first sample of a segment keeps its
    /// wrapped value.
    pub fn unwrap(&self) -> Self {
        let segments = self.segments();
        Self {
            coupler_angles: unwrap_angles(&self.coupler_angles, &segments),
            output_angles: unwrap_angles(&self.output_angles, &segments),
            ..self.clone()
        }
    }
}

fn unwrap_angles(angles: &[f64], segments: &[Range<usize>]) -> Vec<f64> {
    let mut out = angles.to_vec();
    for r in segments {
        let mut offset = 0.;
        for i in r.start + 1..r.end {
            let delta = angles[i] - angles[i - 1];
            if delta > 180. {
                offset -= 360.;
            } else if delta < -180. {
                offset += 360.;
            }
            out[i] = angles[i] + offset;
        }
    }
    out
}

/// Input angles from `start` to `end` (inclusive) by `step`, in degrees.
///
/// A full turn in a single step would only repeat the start pose, so it
/// yields the start angle alone.
pub fn sample_angles(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let span = end - start;
    let mut n = (span / step + EPS).floor() as usize;
    if n == 1 && (step - 360.).abs() < EPS {
        n = 0;
    }
    (0..=n).map(move |i| start + i as f64 * step)
}

fn check_step(step: f64) -> Result<f64> {
    if step.is_finite() && step > 0. {
        Ok(step)
    } else {
        Err(Error::InvalidStep(step))
    }
}

/// Lazily solve each sampled input angle.
///
/// Yield `(input, pose)`, where the pose is `None` for unsolvable angles.
pub fn pose_iter(
    spec: &LinkageSpec,
    branch: Branch,
    start: f64,
    end: f64,
    step: f64,
) -> Result<impl Iterator<Item = (f64, Option<Pose>)> + '_> {
    let (start, end) = (check_angle(start)?, check_angle(end)?);
    if end < start {
        return Err(Error::InvalidRange { start, end });
    }
    let step = check_step(step)?;
    Ok(sample_angles(start, end, step).map(move |t| (t, solve(spec, t, branch))))
}

/// Sweep the input angle over a full revolution, 0° to 360° inclusive.
///
/// ```
/// use four_bar_kin::{sweep, Branch, CouplerPoint, LinkageSpec};
/// let spec = LinkageSpec::example();
/// let locus = sweep(&spec, &CouplerPoint::example(), Branch::Open, 2.).unwrap();
/// assert_eq!(locus.samples, 181);
/// assert_eq!(locus.len(), 181);
/// ```
pub fn sweep(
    spec: &LinkageSpec,
    point: &CouplerPoint,
    branch: Branch,
    step: f64,
) -> Result<Locus> {
    sweep_in(spec, point, branch, 0., 360., step)
}

/// Sweep the input angle from `start` to `end` (inclusive), in degrees.
pub fn sweep_in(
    spec: &LinkageSpec,
    point: &CouplerPoint,
    branch: Branch,
    start: f64,
    end: f64,
    step: f64,
) -> Result<Locus> {
    let iter = pose_iter(spec, branch, start, end, step)?;
    let mut locus = Locus::with_capacity(step, iter.size_hint().0.min(1 << 16));
    for (t, pose) in iter {
        locus.samples += 1;
        if let Some(pose) = pose {
            locus.push(t, &pose, point);
        }
    }
    tracing::debug!(
        %branch,
        samples = locus.samples,
        solved = locus.len(),
        gaps = locus.gaps(),
        "sweep done"
    );
    Ok(locus)
}

#[test]
fn gaps_of_inconsistent_record() {
    let locus = Locus { samples: 0, input_angles: vec![0.], ..Locus::default() };
    assert_eq!(locus.len(), 1);
    assert_eq!(locus.gaps(), 0);
}
