use super::{
    logger::{LinkageInfo, Logger, PoseInfo, SweepInfo},
    project::LinkageArgs,
};
use anyhow::Context as _;
use four_bar_kin::{plot, solve as solve_pose, sweep as sweep_locus, Locus};
use std::path::{Path, PathBuf};

#[derive(clap::Args)]
pub(super) struct SweepCfg {
    #[clap(flatten)]
    pub(super) linkage: LinkageArgs,
    /// Write the samples to a CSV file
    #[clap(long)]
    csv: Option<PathBuf>,
    /// Plot the coupler curve to an SVG file
    #[clap(long)]
    svg: Option<PathBuf>,
    /// Plot the angle curves to an SVG file
    #[clap(long)]
    angles_svg: Option<PathBuf>,
    /// Input angle of the linkage drawn in the coupler curve plot, in degrees
    #[clap(long, default_value_t = 0., allow_negative_numbers = true)]
    at: f64,
    /// Unwrap the angle curves in the CSV output
    #[clap(long)]
    unwrap: bool,
}

pub(super) fn solve(linkage: LinkageArgs, angle: f64) -> anyhow::Result<()> {
    #[derive(serde::Serialize)]
    struct Solved {
        angle: f64,
        solved: bool,
    }

    let project = linkage.load()?;
    let pose = solve_pose(&project.linkage, angle, project.branch);
    let mut stdout = std::io::stdout().lock();
    let mut logger = Logger::new(&mut stdout);
    logger.top_title("linkage")?;
    logger.log(LinkageInfo::new(&project.linkage, project.branch))?;
    logger.title("pose")?;
    logger.log(Solved { angle, solved: pose.is_some() })?;
    if let Some(pose) = pose {
        logger.log(PoseInfo::new(&pose, &project.coupler))?;
    }
    logger.flush()?;
    Ok(())
}

/// Written files of the sweep command.
#[derive(serde::Serialize, Default, PartialEq)]
struct Exports {
    #[serde(skip_serializing_if = "Option::is_none")]
    csv: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    svg: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    angles_svg: Option<PathBuf>,
}

pub(super) fn sweep(cfg: SweepCfg) -> anyhow::Result<()> {
    let SweepCfg { linkage, csv, svg, angles_svg, at, unwrap } = cfg;
    let project = linkage.load()?;
    let locus = sweep_locus(&project.linkage, &project.coupler, project.branch, project.step)?;
    let mut stdout = std::io::stdout().lock();
    let mut logger = Logger::new(&mut stdout);
    logger.top_title("linkage")?;
    logger.log(LinkageInfo::new(&project.linkage, project.branch))?;
    logger.title("sweep")?;
    logger.log(SweepInfo::new(&locus))?;
    let mut exports = Exports::default();
    if let Some(path) = csv {
        write_csv(&path, &locus, unwrap)?;
        exports.csv = Some(path);
    }
    if let Some(path) = svg {
        let pose = solve_pose(&project.linkage, at, project.branch);
        if pose.is_none() {
            tracing::warn!(at, "no linkage to draw at this input angle");
        }
        let svg = plot::SVGBackend::new(&path, (800, 800));
        let pose = pose.as_ref().map(|pose| (pose, &project.coupler));
        plot::plot_locus(svg, "Coupler curve", &locus, pose)
            .with_context(|| format!("plotting error: {}", path.display()))?;
        exports.svg = Some(path);
    }
    if let Some(path) = angles_svg {
        let svg = plot::SVGBackend::new(&path, (800, 600));
        plot::plot_angles(svg, "Coupler and output angles", &locus)
            .with_context(|| format!("plotting error: {}", path.display()))?;
        exports.angles_svg = Some(path);
    }
    if exports != Exports::default() {
        logger.title("exports")?;
        logger.log(&exports)?;
    }
    logger.flush()?;
    Ok(())
}

pub(super) fn write_csv(path: &Path, locus: &Locus, unwrap: bool) -> anyhow::Result<()> {
    let s = if unwrap {
        locus.unwrap().to_csv()
    } else {
        locus.to_csv()
    };
    let s = s.map_err(|e| anyhow::anyhow!("csv serialization error: {e}"))?;
    std::fs::write(path, s).with_context(|| format!("writing file error: {}", path.display()))
}
