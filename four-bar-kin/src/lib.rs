//! Position kinematics of planar four-bar linkages.
//!
//! Given the link lengths and an input angle, [`solve()`] places every joint
//! in the chosen assembly [`Branch`], or reports that the linkage cannot be
//! assembled. [`sweep()`] repeats it over a full input revolution to collect
//! the coupler curve and the angle curves.
//!
//! ```
//! use four_bar_kin::*;
//!
//! let spec = LinkageSpec::new(100., 40., 120., 80.)?;
//! let pose = solve(&spec, 0., Branch::Open).unwrap();
//! assert_eq!(pose.b(), [40., 0.]);
//!
//! let point = CouplerPoint::new(60., 30.)?;
//! let locus = sweep(&spec, &point, Branch::Open, DEFAULT_STEP)?;
//! assert_eq!(locus.trajectory.len(), locus.input_angles.len());
//! # Ok::<(), four_bar_kin::Error>(())
//! ```
#![cfg_attr(doc_cfg, feature(doc_cfg))]
pub use crate::{
    driver::*, error::*, linkage::*, locus::*, newton::*, point::*, solver::*, stat::*,
};

#[cfg(feature = "csv")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "csv")))]
pub mod csv;
mod driver;
mod error;
mod linkage;
mod locus;
mod newton;
#[cfg(feature = "plot")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "plot")))]
pub mod plot;
mod point;
mod solver;
mod stat;
#[cfg(test)]
mod tests;
