//! Configuration file loading

use jacgen_emit::Scaffold;
use jacgen_synth::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

/// Output file used when neither a flag nor the config file names one.
pub const DEFAULT_OUTPUT: &str = "example-functions.hpp";

/// Contents of a `jacgen` TOML configuration file.
///
/// ```toml
/// output = "functions.hpp"
///
/// [generator]
/// input_dim = 10
/// output_dim = 10
/// jacobian_density = 0.3
///
/// [scaffold]
/// namespace = "bench"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub output: Option<PathBuf>,
    pub generator: GeneratorConfig,
    pub scaffold: Scaffold,
}

impl CliConfig {
    /// Load from `path`, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
        let config = toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Output path, falling back to [`DEFAULT_OUTPUT`].
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}
