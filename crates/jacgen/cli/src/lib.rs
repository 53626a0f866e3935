//! jacgen CLI - generate synthetic C++ test functions with controlled
//! Jacobian sparsity.
//!
//! Each run writes one self-contained header holding a host `test_fun`
//! and a CUDA switch routine that compute the same outputs. Settings come
//! from command-line flags, then an optional TOML file, then defaults.

#![deny(unsafe_code)]

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod output;
pub mod pipeline;

pub use config::{CliConfig, DEFAULT_OUTPUT};
pub use error::{CliError, CliResult};
pub use output::{GenerationReport, ReportFormat};
pub use pipeline::{GeneratedModule, Pipeline};

/// jacgen application
#[derive(Parser, Debug)]
#[command(name = "jacgen")]
#[command(about = "Generate differentiable C++ test functions with controllable Jacobian sparsity")]
#[command(version)]
struct Cli {
    /// Number of input variables [default: 3]
    #[arg(long)]
    input_dim: Option<usize>,

    /// Number of output functions [default: 2]
    #[arg(long)]
    output_dim: Option<usize>,

    /// Iterations of the per-output accumulation loop [default: 5]
    #[arg(long)]
    complexity: Option<usize>,

    /// Logical terms per output expression [default: 5]
    #[arg(long)]
    expr_length: Option<usize>,

    /// Random seed [default: 42]
    #[arg(long)]
    seed: Option<u64>,

    /// Fraction of inputs each output depends on, in (0, 1] [default: 1.0]
    #[arg(long, allow_negative_numbers = true)]
    jacobian_density: Option<f64>,

    /// Output header path [default: example-functions.hpp]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "JACGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Summary format printed after generation
    #[arg(long, value_enum, default_value = "text")]
    report: ReportFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Overlay explicit flags on top of the file configuration.
    fn apply(&self, config: &mut CliConfig) {
        let generator = &mut config.generator;
        if let Some(v) = self.input_dim {
            generator.input_dim = v;
        }
        if let Some(v) = self.output_dim {
            generator.output_dim = v;
        }
        if let Some(v) = self.complexity {
            generator.complexity = v;
        }
        if let Some(v) = self.expr_length {
            generator.expr_length = v;
        }
        if let Some(v) = self.seed {
            generator.seed = v;
        }
        if let Some(v) = self.jacobian_density {
            generator.jacobian_density = v;
        }
        if let Some(path) = &self.output {
            config.output = Some(path.clone());
        }
    }
}

/// Run using the current process arguments.
pub fn run() -> CliResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    let path = config.output_path();

    let pipeline = Pipeline::new(config.scaffold.clone());
    let module = pipeline.run(&config.generator, &path)?;

    let report = GenerationReport::new(&module, &path);
    println!("{}", output::render_report(cli.report, &report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_file_values() {
        let cli = Cli::parse_from([
            "jacgen",
            "--seed",
            "9",
            "--jacobian-density",
            "0.5",
            "-o",
            "out.hpp",
        ]);
        let mut config = CliConfig::default();
        config.generator.input_dim = 8;
        config.generator.seed = 1;
        cli.apply(&mut config);

        assert_eq!(config.generator.seed, 9);
        assert_eq!(config.generator.input_dim, 8);
        assert_eq!(config.generator.jacobian_density, 0.5);
        assert_eq!(config.output_path(), PathBuf::from("out.hpp"));
    }

    #[test]
    fn negative_density_parses_for_validation() {
        let cli = Cli::parse_from(["jacgen", "--jacobian-density", "-0.5"]);
        assert_eq!(cli.jacobian_density, Some(-0.5));
    }

    #[test]
    fn report_defaults_to_text() {
        let cli = Cli::parse_from(["jacgen"]);
        assert_eq!(cli.report, ReportFormat::Text);
        assert!(cli.output.is_none());
    }
}
