//! Generation pipeline: select, synthesize, verify, emit, write.

use std::io::Write;
use std::path::Path;

use jacgen_emit::{ModuleArtifact, ModuleDims, ModuleEmitter, ModuleSource, Scaffold};
use jacgen_ir::{FunctionSpec, SpecVerifier};
use jacgen_synth::{ActiveVariableSelector, ExpressionSynthesizer, GeneratorConfig, SeedStream};

use crate::error::{CliError, CliResult};

/// Result of one generation run, held entirely in memory.
#[derive(Clone, Debug)]
pub struct GeneratedModule {
    pub config: GeneratorConfig,
    pub specs: Vec<FunctionSpec>,
    pub source: ModuleSource,
    pub artifact: ModuleArtifact,
}

/// Drives a full generation run.
///
/// A run owns its seed stream from the first draw to the last, so the
/// artifact is a pure function of the [`GeneratorConfig`].
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    emitter: ModuleEmitter,
}

impl Pipeline {
    pub fn new(scaffold: Scaffold) -> Self {
        Self {
            emitter: ModuleEmitter::new(scaffold),
        }
    }

    /// Build every output and emit the header once.
    ///
    /// Invalid configuration is rejected before any draw is made.
    pub fn generate(&self, config: &GeneratorConfig) -> CliResult<GeneratedModule> {
        config
            .validate()
            .map_err(|e| CliError::InvalidArgument(e.to_string()))?;

        tracing::info!(
            input_dim = config.input_dim,
            output_dim = config.output_dim,
            expr_length = config.expr_length,
            seed = config.seed,
            density = config.jacobian_density,
            "generating test functions"
        );

        let mut stream = SeedStream::new(config.seed);
        let synthesizer = ExpressionSynthesizer::new(config.coefficients);
        let verifier = SpecVerifier::new(config.input_dim, config.coefficients);

        let mut specs = Vec::with_capacity(config.output_dim);
        for output in 0..config.output_dim {
            let active = ActiveVariableSelector::select(
                &mut stream,
                config.input_dim,
                config.jacobian_density,
            )?;
            let expression = synthesizer.synthesize(&mut stream, &active, config.expr_length)?;
            let spec = FunctionSpec::new(output, active, expression);
            verifier.verify(&spec)?;
            specs.push(spec);
        }
        tracing::debug!(draws = stream.draws(), "synthesis complete");

        let dims = ModuleDims {
            input_dim: config.input_dim,
            output_dim: config.output_dim,
            complexity: config.complexity,
        };
        let source = self.emitter.emit(&specs, dims)?;
        let artifact = ModuleArtifact::new(source.text.clone());
        tracing::info!(hash = %artifact.hash, bytes = artifact.len(), "emitted module");

        Ok(GeneratedModule {
            config: config.clone(),
            specs,
            source,
            artifact,
        })
    }

    /// Write the artifact to `path`.
    ///
    /// The text goes to a temporary file beside `path` that is renamed into
    /// place once complete. On failure the temporary is removed and any
    /// existing file at `path` is left untouched.
    pub fn write(&self, module: &GeneratedModule, path: &Path) -> CliResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(module.artifact.text.as_bytes())?;
        file.flush()?;
        file.persist(path).map_err(|e| e.error)?;
        tracing::info!(path = %path.display(), "wrote generated header");
        Ok(())
    }

    /// Generate and write; nothing touches `path` unless generation succeeds.
    pub fn run(&self, config: &GeneratorConfig, path: &Path) -> CliResult<GeneratedModule> {
        let module = self.generate(config)?;
        self.write(&module, path)?;
        Ok(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jacgen_emit::{CxxPrinter, ExprPrinter};

    fn scenario() -> GeneratorConfig {
        GeneratorConfig {
            seed: 7,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn scenario_seed_seven() {
        let module = Pipeline::default().generate(&scenario()).unwrap();
        assert_eq!(module.specs.len(), 2);
        for spec in &module.specs {
            assert_eq!(spec.active.sorted(), vec![0, 1, 2]);
        }
        assert_eq!(module.source.host.len(), 2);
        assert_eq!(module.source.accelerated.len(), 2);
        assert!(module.source.verify_equivalence().is_ok());

        let printer = CxxPrinter::default();
        for (h, a) in module.source.host.iter().zip(&module.source.accelerated) {
            assert_eq!(printer.print(&h.expression), printer.print(&a.expression));
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let pipeline = Pipeline::default();
        let a = pipeline.generate(&GeneratorConfig::benchmark()).unwrap();
        let b = pipeline.generate(&GeneratorConfig::benchmark()).unwrap();
        assert_eq!(a.artifact, b.artifact);
        assert!(a.artifact.verify_hash());
    }

    #[test]
    fn different_seeds_differ() {
        let pipeline = Pipeline::default();
        let a = pipeline.generate(&scenario()).unwrap();
        let b = pipeline.generate(&GeneratorConfig::default()).unwrap();
        assert_ne!(a.artifact.hash, b.artifact.hash);
    }

    #[test]
    fn sparse_generation_sizes_active_sets() {
        let config = GeneratorConfig {
            input_dim: 10,
            output_dim: 6,
            jacobian_density: 0.25,
            ..GeneratorConfig::default()
        };
        let module = Pipeline::default().generate(&config).unwrap();
        for spec in &module.specs {
            assert_eq!(spec.active.len(), 2);
        }
    }

    #[test]
    fn invalid_density_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.hpp");
        let config = GeneratorConfig {
            jacobian_density: 0.0,
            ..GeneratorConfig::default()
        };
        let err = Pipeline::default().run(&config, &path).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
        assert!(!path.exists());
    }

    #[test]
    fn run_writes_artifact_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.hpp");
        let module = Pipeline::default().run(&scenario(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, module.artifact.text);
        assert!(written.starts_with("#pragma once\n"));
        assert!(written.ends_with("} // namespace testfun\n"));
    }

    #[test]
    fn unwritable_path_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.hpp");
        let err = Pipeline::default().run(&scenario(), &path).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn failed_write_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory at the target makes the final rename fail after the
        // text has been written out.
        let path = dir.path().join("out.hpp");
        std::fs::create_dir(&path).unwrap();

        let err = Pipeline::default().run(&scenario(), &path).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
        assert!(path.is_dir());
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn write_replaces_existing_header_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.hpp");
        std::fs::write(&path, "stale header that is longer than nothing").unwrap();

        let module = Pipeline::default().run(&scenario(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), module.artifact.text);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_generation_keeps_existing_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.hpp");
        std::fs::write(&path, "previous").unwrap();
        let config = GeneratorConfig {
            complexity: 0,
            ..scenario()
        };
        assert!(Pipeline::default().run(&config, &path).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous");
    }

    #[test]
    fn custom_scaffold_namespace() {
        let pipeline = Pipeline::new(Scaffold {
            namespace: "bench".into(),
            ..Scaffold::default()
        });
        let module = pipeline.generate(&scenario()).unwrap();
        assert!(module.artifact.text.contains("namespace bench {\n"));
    }
}
