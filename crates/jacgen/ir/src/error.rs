//! Error types for the expression IR.

use thiserror::Error;

/// Errors raised while checking IR invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IrError {
    /// A structural invariant of a function spec does not hold.
    #[error("invariant violation in output {output}: {detail}")]
    InvariantViolation { output: usize, detail: String },
}

/// Convenience result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
