//! Module emission: the single pass that turns specs into a header.

use jacgen_ir::FunctionSpec;
use serde::{Deserialize, Serialize};

use crate::backend::{AcceleratedPrinter, Backend, HostPrinter, Routine, RoutinePrinter};
use crate::error::{EmitError, EmitResult};
use crate::scaffold::Scaffold;

/// Dimensions baked into the header as `constexpr` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDims {
    pub input_dim: usize,
    pub output_dim: usize,
    pub complexity: usize,
}

/// Emitted routines for both backends plus the rendered header text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleSource {
    pub dims: ModuleDims,
    pub host: Vec<Routine>,
    pub accelerated: Vec<Routine>,
    pub text: String,
}

impl ModuleSource {
    /// Check that every output has structurally identical host and
    /// accelerated expressions.
    pub fn verify_equivalence(&self) -> EmitResult<()> {
        verify_routines(&self.host, &self.accelerated)
    }
}

fn verify_routines(host: &[Routine], accelerated: &[Routine]) -> EmitResult<()> {
    for h in host {
        let a = accelerated
            .iter()
            .find(|a| a.output == h.output)
            .ok_or(EmitError::MissingRoutine {
                backend: Backend::Accelerated,
                output: h.output,
            })?;
        if a.expression != h.expression {
            return Err(EmitError::EquivalenceMismatch { output: h.output });
        }
    }
    for a in accelerated {
        if !host.iter().any(|h| h.output == a.output) {
            return Err(EmitError::MissingRoutine {
                backend: Backend::Host,
                output: a.output,
            });
        }
    }
    Ok(())
}

/// Renders a full header from function specs.
#[derive(Clone, Debug, Default)]
pub struct ModuleEmitter {
    pub scaffold: Scaffold,
    pub host: HostPrinter,
    pub accelerated: AcceleratedPrinter,
}

impl ModuleEmitter {
    pub fn new(scaffold: Scaffold) -> Self {
        Self {
            scaffold,
            ..Self::default()
        }
    }

    /// Emit every spec on both backends and render the header.
    ///
    /// Routines are compared structurally before any text is produced.
    pub fn emit(&self, specs: &[FunctionSpec], dims: ModuleDims) -> EmitResult<ModuleSource> {
        let mut host = Vec::with_capacity(specs.len());
        let mut accelerated = Vec::with_capacity(specs.len());

        for spec in specs {
            let expression = spec.expression.lower();
            let active = spec.active.sorted();
            host.push(Routine {
                backend: self.host.backend(),
                output: spec.output,
                active: active.clone(),
                expression: expression.clone(),
            });
            accelerated.push(Routine {
                backend: self.accelerated.backend(),
                output: spec.output,
                active,
                expression,
            });
        }

        verify_routines(&host, &accelerated)?;

        let mut text = String::new();
        self.scaffold.write_prologue(&mut text, &dims);
        for routine in &host {
            self.host.write_routine(&mut text, routine);
        }
        self.scaffold.write_accelerated_prologue(&mut text);
        for routine in &accelerated {
            self.accelerated.write_routine(&mut text, routine);
        }
        self.scaffold.write_epilogue(&mut text);

        tracing::debug!(
            outputs = specs.len(),
            bytes = text.len(),
            "rendered module source"
        );

        Ok(ModuleSource {
            dims,
            host,
            accelerated,
            text,
        })
    }
}
