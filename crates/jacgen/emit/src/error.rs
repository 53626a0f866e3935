//! Error types for source emission.

use thiserror::Error;

use crate::backend::Backend;

/// Errors that can occur while emitting a module.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmitError {
    /// Host and accelerated routines for an output differ.
    #[error("host and accelerated expressions differ for output {output}")]
    EquivalenceMismatch { output: usize },

    /// An output has a routine on one backend but not the other.
    #[error("{backend} routine missing for output {output}")]
    MissingRoutine { backend: Backend, output: usize },
}

/// Convenience result type for emission.
pub type EmitResult<T> = Result<T, EmitError>;
