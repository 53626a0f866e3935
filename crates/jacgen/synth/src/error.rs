//! Error types for expression synthesis.

use thiserror::Error;

/// Errors that can occur while configuring or running synthesis.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SynthError {
    /// Jacobian density outside `(0, 1]`.
    #[error("jacobian-density must be between 0.0 and 1.0, got {0}")]
    InvalidDensity(f64),

    /// A dimension that must be positive was zero.
    #[error("{name} must be at least 1, got {value}")]
    InvalidDimension { name: &'static str, value: usize },

    /// A dimension emitted as a C++ `int` does not fit one.
    #[error("{name} must be at most {max}, got {value}")]
    DimensionTooLarge {
        name: &'static str,
        value: usize,
        max: usize,
    },

    /// Coefficient bounds are not a positive, ordered range.
    #[error("invalid coefficient bounds [{min}, {max}]")]
    InvalidCoefficients { min: f64, max: f64 },

    /// More distinct items requested than the population holds.
    #[error("cannot sample {requested} distinct items from a population of {available}")]
    SampleTooLarge { requested: usize, available: usize },

    /// A choice was requested from an empty option list.
    #[error("cannot choose from an empty option list")]
    EmptyChoice,

    /// Integer draw with an empty inclusive range.
    #[error("empty integer range [{lo}, {hi}]")]
    InvalidRange { lo: usize, hi: usize },

    /// Float draw with an inverted range.
    #[error("empty float range [{lo}, {hi}]")]
    InvalidUniformRange { lo: f64, hi: f64 },
}

/// Convenience result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;
