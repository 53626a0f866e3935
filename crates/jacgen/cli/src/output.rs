//! Run summary formatting

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use jacgen_emit::ContentHash;
use serde::Serialize;

use crate::error::CliResult;
use crate::pipeline::GeneratedModule;

/// How the post-run summary is printed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Summary of a completed generation run.
#[derive(Clone, Debug, Serialize)]
pub struct GenerationReport {
    pub output: PathBuf,
    pub input_dim: usize,
    pub output_dim: usize,
    pub expr_length: usize,
    pub complexity: usize,
    pub seed: u64,
    pub jacobian_density: f64,
    pub content_hash: ContentHash,
    pub bytes: usize,
    /// Sorted active variable indices per output.
    pub active_sets: Vec<Vec<usize>>,
}

impl GenerationReport {
    pub fn new(module: &GeneratedModule, output: &Path) -> Self {
        let config = &module.config;
        Self {
            output: output.to_path_buf(),
            input_dim: config.input_dim,
            output_dim: config.output_dim,
            expr_length: config.expr_length,
            complexity: config.complexity,
            seed: config.seed,
            jacobian_density: config.jacobian_density,
            content_hash: module.artifact.hash,
            bytes: module.artifact.len(),
            active_sets: module.specs.iter().map(|s| s.active.sorted()).collect(),
        }
    }
}

pub fn render_report(format: ReportFormat, report: &GenerationReport) -> CliResult<String> {
    match format {
        ReportFormat::Text => Ok(render_text(report)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

fn render_text(report: &GenerationReport) -> String {
    let mut lines = vec![
        format!("Generated {} with:", report.output.display()),
        format!("  Input dimension: {}", report.input_dim),
        format!("  Output dimension: {}", report.output_dim),
        format!("  Expr length: {}", report.expr_length),
        format!("  Complexity: {}", report.complexity),
        format!("  Random seed: {}", report.seed),
        format!("  Target Jacobian density: {:.2}", report.jacobian_density),
    ];
    lines.push(format!("  Content hash: {}", report.content_hash.to_hex()));
    lines.join("\n")
}
