use super::project::LinkageArgs;
use four_bar_kin::Driver;
use std::{
    io::Write as _,
    time::{Duration, Instant},
};

#[derive(clap::Args)]
pub(super) struct AnimateCfg {
    #[clap(flatten)]
    pub(super) linkage: LinkageArgs,
    /// Start angle in degrees
    #[clap(long, default_value_t = 0., allow_negative_numbers = true)]
    start: f64,
    /// Angle increment per frame in degrees
    #[clap(long, default_value_t = 1.)]
    increment: f64,
    /// Number of frames
    #[clap(long, default_value_t = 361)]
    frames: usize,
    /// Frames per second, zero to print as fast as possible
    #[clap(long, default_value_t = 0.)]
    fps: f64,
}

/// Time between two frames, `None` to print without waiting.
fn frame_interval(fps: f64) -> anyhow::Result<Option<Duration>> {
    anyhow::ensure!(
        fps.is_finite() && fps >= 0.,
        "frame rate must be a non-negative finite number, got {fps}"
    );
    if fps == 0. {
        return Ok(None);
    }
    Duration::try_from_secs_f64(fps.recip())
        .map(Some)
        .map_err(|_| anyhow::anyhow!("frame rate is too small, got {fps}"))
}

/// Deadline of a frame since the animation started.
fn frame_deadline(interval: Duration, frame: usize) -> Option<Duration> {
    let n = u32::try_from(frame).ok()?.checked_add(1)?;
    interval.checked_mul(n)
}

pub(super) fn animate(cfg: AnimateCfg) -> anyhow::Result<()> {
    let AnimateCfg { linkage, start, increment, frames, fps } = cfg;
    let project = linkage.load()?;
    let mut driver = Driver::new(start, increment)?;
    let interval = frame_interval(fps)?;
    let mut out = std::io::stdout().lock();
    let t0 = Instant::now();
    let mut missing = 0;
    for (i, frame) in driver
        .frames(&project.linkage, &project.coupler, project.branch, frames)
        .enumerate()
    {
        match (frame.pose, frame.point) {
            (Some(pose), Some([px, py])) => {
                let [cx, cy] = pose.c();
                writeln!(
                    out,
                    "{:>7.2} | C=({cx:.04}, {cy:.04}) P=({px:.04}, {py:.04}) coupler={:.04} output={:.04}",
                    frame.angle, pose.coupler_angle, pose.output_angle
                )?;
            }
            _ => {
                missing += 1;
                writeln!(out, "{:>7.2} | no solution", frame.angle)?;
            }
        }
        out.flush()?;
        if let Some(interval) = interval {
            // Keep the frame rate without drifting
            let wait = frame_deadline(interval, i).and_then(|t| t.checked_sub(t0.elapsed()));
            if let Some(wait) = wait {
                std::thread::sleep(wait);
            }
        }
    }
    tracing::debug!(frames, missing, "animation finished");
    Ok(())
}

#[test]
fn frame_timing() {
    assert_eq!(frame_interval(0.).unwrap(), None);
    assert_eq!(frame_interval(4.).unwrap(), Some(Duration::from_millis(250)));
    assert!(frame_interval(-1.).is_err());
    assert!(frame_interval(f64::NAN).is_err());
    assert!(frame_interval(f64::INFINITY).is_err());
    // The reciprocal of a subnormal rate is infinite
    assert!(frame_interval(f64::MIN_POSITIVE / 4.).is_err());
    let interval = Duration::from_millis(250);
    assert_eq!(frame_deadline(interval, 3), Some(Duration::from_secs(1)));
    assert_eq!(frame_deadline(interval, u32::MAX as usize), None);
    assert_eq!(frame_deadline(Duration::MAX, 1), None);
}
