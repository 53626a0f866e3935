use jacgen_ir::CoefficientBounds;
use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};

/// Largest dimension that fits the header's 32-bit `int` constants.
pub const MAX_EMITTED_DIMENSION: usize = i32::MAX as usize;

/// Parameters of one generation run.
///
/// The emitted artifact is a pure function of these values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Input vector dimension.
    pub input_dim: usize,
    /// Number of function outputs.
    pub output_dim: usize,
    /// Iterations each output's accumulation loop performs.
    pub complexity: usize,
    /// Logical terms per output expression.
    pub expr_length: usize,
    /// Seed for the draw sequence.
    pub seed: u64,
    /// Target fraction of inputs each output depends on, in `(0, 1]`.
    pub jacobian_density: f64,
    /// Range coefficients are drawn from before shrinking.
    pub coefficients: CoefficientBounds,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input_dim: 3,
            output_dim: 2,
            complexity: 5,
            expr_length: 5,
            seed: 42,
            jacobian_density: 1.0,
            coefficients: CoefficientBounds::default(),
        }
    }
}

impl GeneratorConfig {
    /// Dense 10×10 configuration matching the checked-in benchmark header.
    pub fn benchmark() -> Self {
        Self {
            input_dim: 10,
            output_dim: 10,
            ..Self::default()
        }
    }

    /// Check every parameter before any draw is made.
    pub fn validate(&self) -> SynthResult<()> {
        // Written to also reject NaN.
        if !(self.jacobian_density > 0.0 && self.jacobian_density <= 1.0) {
            return Err(SynthError::InvalidDensity(self.jacobian_density));
        }
        for (name, value) in [
            ("input_dim", self.input_dim),
            ("output_dim", self.output_dim),
            ("complexity", self.complexity),
            ("expr_length", self.expr_length),
        ] {
            if value == 0 {
                return Err(SynthError::InvalidDimension { name, value });
            }
        }
        // Rendered as `constexpr int` in the header.
        for (name, value) in [
            ("input_dim", self.input_dim),
            ("output_dim", self.output_dim),
            ("complexity", self.complexity),
        ] {
            if value > MAX_EMITTED_DIMENSION {
                return Err(SynthError::DimensionTooLarge {
                    name,
                    value,
                    max: MAX_EMITTED_DIMENSION,
                });
            }
        }
        let CoefficientBounds { min, max } = self.coefficients;
        if !(min > 0.0 && min <= max && max.is_finite()) {
            return Err(SynthError::InvalidCoefficients { min, max });
        }
        Ok(())
    }

    /// Size of every output's active variable set.
    pub fn active_count(&self) -> usize {
        crate::selector::active_count(self.input_dim, self.jacobian_density)
    }
}
