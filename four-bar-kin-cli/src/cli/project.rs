use anyhow::Context as _;
use four_bar_kin::{Branch, CouplerPoint, LinkageSpec, DEFAULT_STEP};
use std::path::{Path, PathBuf};

/// A linkage project stored in RON format.
///
/// ```ron
/// (
///     linkage: (d: 100., a: 40., b: 120., c: 80.),
///     coupler: (e: 60., alpha: 30.),
///     branch: open,
///     step: 2.,
/// )
/// ```
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub(crate) struct Project {
    pub(crate) linkage: LinkageSpec,
    pub(crate) coupler: CouplerPoint,
    pub(crate) branch: Branch,
    pub(crate) step: f64,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            linkage: LinkageSpec::example(),
            coupler: CouplerPoint::example(),
            branch: Branch::Open,
            step: DEFAULT_STEP,
        }
    }
}

impl Project {
    pub(crate) fn read(path: &Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading file error: {}", path.display()))?;
        ron::from_str(&s).with_context(|| format!("ron serialization error: {}", path.display()))
    }
}

/// Linkage options, override the fields of the project file.
#[derive(clap::Args, Clone, Debug, Default)]
pub(crate) struct LinkageArgs {
    /// Project file in RON format, default to the example crank rocker
    #[clap(long)]
    config: Option<PathBuf>,
    /// Ground link length
    #[clap(short)]
    d: Option<f64>,
    /// Input crank length
    #[clap(short)]
    a: Option<f64>,
    /// Coupler link length
    #[clap(short)]
    b: Option<f64>,
    /// Output link length
    #[clap(short)]
    c: Option<f64>,
    /// Distance of the coupler point from joint B
    #[clap(short)]
    e: Option<f64>,
    /// Angle of the coupler point from the coupler link, in degrees
    #[clap(long, allow_negative_numbers = true)]
    alpha: Option<f64>,
    /// Assembly branch
    #[clap(long, value_enum)]
    branch: Option<Branch>,
    /// Sampling step of the input angle, in degrees
    #[clap(long)]
    step: Option<f64>,
}

impl LinkageArgs {
    pub(crate) fn load(&self) -> anyhow::Result<Project> {
        let mut project = match &self.config {
            Some(path) => Project::read(path)?,
            None => Project::default(),
        };
        let [d, a, b, c] = project.linkage.planar_loop();
        project.linkage = LinkageSpec::new(
            self.d.unwrap_or(d),
            self.a.unwrap_or(a),
            self.b.unwrap_or(b),
            self.c.unwrap_or(c),
        )?;
        let coupler = &project.coupler;
        project.coupler = CouplerPoint::new(
            self.e.unwrap_or(coupler.e()),
            self.alpha.unwrap_or(coupler.alpha()),
        )?;
        if let Some(branch) = self.branch {
            project.branch = branch;
        }
        if let Some(step) = self.step {
            project.step = step;
        }
        tracing::debug!(?project, "project loaded");
        Ok(project)
    }
}

#[test]
fn read_project() {
    let s = "(linkage: (d: 100., a: 40., b: 120., c: 80.), branch: closed)";
    let project = ron::from_str::<Project>(s).unwrap();
    assert_eq!(project.linkage.planar_loop(), [100., 40., 120., 80.]);
    assert_eq!(project.branch, Branch::Closed);
    assert_eq!(project.coupler, CouplerPoint::example());
    assert_eq!(project.step, DEFAULT_STEP);
    // Checked by the linkage constructor
    assert!(ron::from_str::<Project>("(linkage: (d: 1., a: -1., b: 1., c: 1.))").is_err());
    let s = ron::to_string(&Project::default()).unwrap();
    assert_eq!(ron::from_str::<Project>(&s).unwrap(), Project::default());
}
