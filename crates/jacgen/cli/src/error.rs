//! CLI error types

use thiserror::Error;

use jacgen_emit::EmitError;
use jacgen_ir::IrError;
use jacgen_synth::SynthError;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// User-supplied argument rejected before generation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Synthesis failed
    #[error("Synthesis error: {0}")]
    Synth(#[from] SynthError),

    /// Emission failed
    #[error("Emission error: {0}")]
    Emit(#[from] EmitError),

    /// A synthesized spec broke an IR invariant
    #[error("Verification error: {0}")]
    Ir(#[from] IrError),
}

impl CliError {
    /// Process exit code: 2 for usage errors, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidArgument(_) => 2,
            _ => 1,
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
