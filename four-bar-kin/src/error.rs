//! Error types of the linkage inputs.
use thiserror::Error;

/// Contract violations caught at the boundary.
///
/// An input angle where the linkage cannot be assembled is *not* an error,
/// see [`crate::solve()`].
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// A link length is zero, negative or not finite.
    #[error("link `{name}` must be a positive finite length, got {value}")]
    InvalidLength {
        /// Name of the link
        name: &'static str,
        /// The rejected value
        value: f64,
    },
    /// The coupler point offset is negative or not finite.
    #[error("coupler point offset must be a non-negative finite length, got {0}")]
    InvalidOffset(f64),
    /// An angle is not finite.
    #[error("angle must be finite, got {0}")]
    InvalidAngle(f64),
    /// The sampling step is zero, negative or not finite.
    #[error("sampling step must be a positive finite angle, got {0}")]
    InvalidStep(f64),
    /// The sampling range is empty or not finite.
    #[error("invalid sampling range [{start}, {end}]")]
    InvalidRange {
        /// Start angle
        start: f64,
        /// End angle
        end: f64,
    },
}

/// Result type of the linkage inputs.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn check_length(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0. {
        Ok(value)
    } else {
        Err(Error::InvalidLength { name, value })
    }
}

pub(crate) fn check_angle(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidAngle(value))
    }
}
