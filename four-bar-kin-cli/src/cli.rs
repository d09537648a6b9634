use self::project::LinkageArgs;
use std::path::PathBuf;

mod animate;
mod batch;
mod logger;
mod project;
mod sweep;

const APP_NAME: &str = env!("CARGO_BIN_NAME");

#[derive(clap::Parser)]
#[clap(name = APP_NAME, version, author, about)]
pub(crate) struct Entry {
    /// Print debug logs to stderr, `RUST_LOG` takes precedence
    #[clap(short, long, global = true)]
    verbose: bool,
    #[clap(subcommand)]
    cmd: Cmd,
}

#[derive(clap::Subcommand)]
enum Cmd {
    /// Solve the joint positions at one input angle
    Solve {
        #[clap(flatten)]
        linkage: LinkageArgs,
        /// Input angle in degrees
        #[clap(default_value_t = 0., allow_negative_numbers = true)]
        angle: f64,
    },
    /// Sweep a full input revolution and export the curves
    Sweep(sweep::SweepCfg),
    /// Advance the input angle frame by frame
    Animate(animate::AnimateCfg),
    /// Sweep project files in parallel, writing CSV and SVG beside them
    Batch {
        /// Project files in RON format
        #[clap(required = true)]
        files: Vec<PathBuf>,
        /// Disable parallel computing
        #[clap(long)]
        no_parallel: bool,
        /// Unwrap the angle curves in the CSV output
        #[clap(long)]
        unwrap: bool,
    },
}

impl Entry {
    pub(super) fn main() {
        let entry = <Self as clap::Parser>::parse_from(wild::args());
        init_tracing(entry.verbose);
        register_panic_hook();
        let res = match entry.cmd {
            Cmd::Solve { linkage, angle } => sweep::solve(linkage, angle),
            Cmd::Sweep(cfg) => sweep::sweep(cfg),
            Cmd::Animate(cfg) => animate::animate(cfg),
            Cmd::Batch { files, no_parallel, unwrap } => batch::batch(files, no_parallel, unwrap),
        };
        if let Err(e) = res {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn register_panic_hook() {
    // Print panic messages without stack trace
    std::panic::set_hook(Box::new(|info| {
        match info.payload().downcast_ref::<&str>() {
            Some(s) => eprintln!("{s}"),
            None => eprintln!("{info}"),
        }
        std::process::exit(1);
    }));
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Entry::command().debug_assert();
}

#[test]
fn parse_args() {
    use clap::Parser;
    let entry = Entry::try_parse_from([
        APP_NAME, "solve", "-d", "100", "-a", "40", "-b", "120", "-c", "80", "--branch",
        "elbow-down", "-30",
    ])
    .unwrap();
    let Cmd::Solve { linkage, angle } = entry.cmd else {
        panic!("expect solve command");
    };
    assert_eq!(angle, -30.);
    let project = linkage.load().unwrap();
    assert_eq!(project.linkage.planar_loop(), [100., 40., 120., 80.]);
    assert_eq!(project.branch, four_bar_kin::Branch::Closed);
    assert!(Entry::try_parse_from([APP_NAME, "solve", "-a", "0"])
        .unwrap()
        .cmd
        .into_linkage()
        .is_some_and(|args| args.load().is_err()));
    assert!(Entry::try_parse_from([APP_NAME, "batch"]).is_err());
}

#[cfg(test)]
impl Cmd {
    fn into_linkage(self) -> Option<LinkageArgs> {
        match self {
            Self::Solve { linkage, .. } => Some(linkage),
            Self::Sweep(cfg) => Some(cfg.linkage),
            Self::Animate(cfg) => Some(cfg.linkage),
            Self::Batch { .. } => None,
        }
    }
}
