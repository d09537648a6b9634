use super::{project::Project, sweep::write_csv};
use anyhow::Context as _;
use four_bar_kin::{plot, solve, sweep};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::{ffi::OsStr, path::PathBuf, time::Instant};

// Sweep, CSV, SVG
const STAGES: u64 = 3;

pub(super) fn batch(files: Vec<PathBuf>, no_parallel: bool, unwrap: bool) -> anyhow::Result<()> {
    println!("files={}, parallel={}, unwrap={unwrap}", files.len(), !no_parallel);
    let mpb = MultiProgress::new();
    let f = |file| run(&mpb, file, unwrap);
    let failed = if no_parallel {
        files.into_iter().map(f).filter(|ok| !ok).count()
    } else {
        files.into_par_iter().map(f).filter(|ok| !ok).count()
    };
    if failed > 0 {
        anyhow::bail!("{failed} project(s) failed");
    }
    Ok(())
}

fn run(mpb: &MultiProgress, file: PathBuf, unwrap: bool) -> bool {
    let pb = mpb.add(ProgressBar::new(STAGES));
    let title = file
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("project")
        .to_string();
    const STYLE: &str = "[{prefix}] {elapsed_precise} {wide_bar} {pos}/{len} {msg}";
    if let Ok(style) = ProgressStyle::with_template(STYLE) {
        pb.set_style(style);
    }
    pb.set_prefix(title.clone());
    let t0 = Instant::now();
    let f = || -> anyhow::Result<String> {
        let Project { linkage, coupler, branch, step } = Project::read(&file)?;
        pb.set_message("sweeping");
        let locus = sweep(&linkage, &coupler, branch, step)?;
        pb.inc(1);
        let root = file.parent().map(PathBuf::from).unwrap_or_default();
        pb.set_message("writing csv");
        write_csv(&root.join(format!("{title}.csv")), &locus, unwrap)?;
        pb.inc(1);
        pb.set_message("plotting");
        let path = root.join(format!("{title}.svg"));
        let pose = locus
            .input_angles
            .first()
            .and_then(|&t| solve(&linkage, t, branch));
        let svg = plot::SVGBackend::new(&path, (800, 800));
        plot::plot_locus(svg, &title, &locus, pose.as_ref().map(|p| (p, &coupler)))
            .with_context(|| format!("plotting error: {}", path.display()))?;
        pb.inc(1);
        Ok(format!("| samples: {} | gaps: {}", locus.samples, locus.gaps()))
    };
    match f() {
        Ok(msg) => {
            pb.finish_with_message(format!("{msg} | spent: {:?}", t0.elapsed()));
            true
        }
        Err(e) => {
            tracing::warn!(file = %file.display(), "{e:#}");
            pb.finish_with_message(format!("| error: {e:#}"));
            false
        }
    }
}
