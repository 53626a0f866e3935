//! Structural verification of synthesized function specs.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{IrError, IrResult};
use crate::spec::FunctionSpec;
use crate::term::Term;

/// Inclusive range coefficients are drawn from before any shrinking.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoefficientBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for CoefficientBounds {
    fn default() -> Self {
        Self {
            min: 0.05,
            max: 0.3,
        }
    }
}

impl CoefficientBounds {
    /// Bounds after applying `scale` and then dividing by `divisor`.
    fn scaled(&self, scale: f64, divisor: f64) -> (f64, f64) {
        (self.min * scale / divisor, self.max * scale / divisor)
    }
}

/// Verifier that checks the invariants of a [`FunctionSpec`].
pub struct SpecVerifier {
    input_dim: usize,
    bounds: CoefficientBounds,
}

impl SpecVerifier {
    pub fn new(input_dim: usize, bounds: CoefficientBounds) -> Self {
        Self { input_dim, bounds }
    }

    /// Verify a function spec.
    ///
    /// # Checks performed
    ///
    /// 1. The active set is non-empty, duplicate-free, and within `input_dim`.
    /// 2. Every referenced variable belongs to the active set.
    /// 3. Product terms use between 2 and `min(3, |active|)` distinct variables.
    /// 4. Coefficients lie within their (shrunk) bounds.
    /// 5. Every logical term is followed by a bookkeeping term with the same
    ///    coefficient.
    pub fn verify(&self, spec: &FunctionSpec) -> IrResult<()> {
        let fail = |detail: String| IrError::InvariantViolation {
            output: spec.output,
            detail,
        };

        // 1. Active set shape.
        if spec.active.is_empty() {
            return Err(fail("active set is empty".into()));
        }
        let mut seen = HashSet::new();
        for &index in spec.active.indices() {
            if index >= self.input_dim {
                return Err(fail(format!(
                    "active index {} out of range for input_dim {}",
                    index, self.input_dim
                )));
            }
            if !seen.insert(index) {
                return Err(fail(format!("active index {} drawn twice", index)));
            }
        }

        for (position, term) in spec.expression.terms.iter().enumerate() {
            // 2. Variable membership.
            for var in term.variables() {
                if !spec.active.contains(var) {
                    return Err(fail(format!(
                        "term {} references x[{}] outside the active set",
                        position, var
                    )));
                }
            }

            // 3 + 4. Arity and coefficient bounds.
            let value = term.coefficient().value;
            let (lo, hi) = match term {
                Term::Unary { .. } | Term::Bookkeeping { .. } => self.bounds.scaled(1.0, 1.0),
                Term::Binary { op, .. } => self.bounds.scaled(op.coefficient_scale(), 1.0),
                Term::Product { variables, .. } => {
                    let k = variables.len();
                    let max_arity = spec.active.len().min(3);
                    if k < 2 || k > max_arity {
                        return Err(fail(format!(
                            "product term {} has {} variables, expected 2..={}",
                            position, k, max_arity
                        )));
                    }
                    let distinct: HashSet<_> = variables.iter().collect();
                    if distinct.len() != k {
                        return Err(fail(format!(
                            "product term {} repeats a variable",
                            position
                        )));
                    }
                    self.bounds.scaled(1.0, (k * k) as f64)
                }
            };
            // Bookkeeping fragments inherit shrunk coefficients, so only
            // their pairing is checked below.
            if term.is_logical() && !(lo..=hi).contains(&value) {
                return Err(fail(format!(
                    "term {} coefficient {} outside [{}, {}]",
                    position, value, lo, hi
                )));
            }
        }

        // 5. Bookkeeping pairing.
        let terms = &spec.expression.terms;
        if terms.len() % 2 != 0 {
            return Err(fail("unpaired trailing term".into()));
        }
        for (pair, chunk) in terms.chunks(2).enumerate() {
            match (&chunk[0], &chunk[1]) {
                (logical, Term::Bookkeeping { coefficient })
                    if logical.is_logical()
                        && logical.coefficient().value == coefficient.value => {}
                _ => {
                    return Err(fail(format!(
                        "term pair {} is not a logical term followed by its bookkeeping fragment",
                        pair
                    )))
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{ActiveSet, Expression};
    use crate::term::{BinaryOp, Coefficient, UnaryFn};

    fn paired(term: Term) -> Vec<Term> {
        let coefficient = *term.coefficient();
        vec![term, Term::Bookkeeping { coefficient }]
    }

    fn valid_spec() -> FunctionSpec {
        let mut terms = paired(Term::Unary {
            function: UnaryFn::LogSafe,
            variable: 2,
            coefficient: Coefficient::new(0.2, 3),
        });
        terms.extend(paired(Term::Binary {
            op: BinaryOp::Mul,
            lhs: 0,
            rhs: 2,
            coefficient: Coefficient::new(0.01, 4),
        }));
        terms.extend(paired(Term::Product {
            variables: vec![1, 0, 2],
            coefficient: Coefficient::new(0.02, 4),
        }));
        FunctionSpec::new(0, ActiveSet::new(vec![2, 0, 1]), Expression::new(terms))
    }

    fn verifier() -> SpecVerifier {
        SpecVerifier::new(3, CoefficientBounds::default())
    }

    #[test]
    fn verify_valid_spec() {
        assert!(verifier().verify(&valid_spec()).is_ok());
    }

    #[test]
    fn verify_empty_active_set_fails() {
        let mut spec = valid_spec();
        spec.active = ActiveSet::new(vec![]);
        let err = verifier().verify(&spec).unwrap_err();
        assert!(err.to_string().contains("active set is empty"));
    }

    #[test]
    fn verify_out_of_range_index_fails() {
        let mut spec = valid_spec();
        spec.active = ActiveSet::new(vec![0, 5]);
        spec.expression = Expression::default();
        let err = verifier().verify(&spec).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn verify_foreign_variable_fails() {
        let mut spec = valid_spec();
        spec.active = ActiveSet::new(vec![2, 0]);
        let err = verifier().verify(&spec).unwrap_err();
        assert!(err.to_string().contains("outside the active set"));
    }

    #[test]
    fn verify_product_arity_capped_by_active_set() {
        let terms = paired(Term::Product {
            variables: vec![0, 1, 2],
            coefficient: Coefficient::new(0.02, 4),
        });
        let spec = FunctionSpec::new(1, ActiveSet::new(vec![0, 1]), Expression::new(terms));
        let err = verifier().verify(&spec).unwrap_err();
        assert!(matches!(err, IrError::InvariantViolation { output: 1, .. }));
    }

    #[test]
    fn verify_unshrunk_product_coefficient_fails() {
        let terms = paired(Term::Product {
            variables: vec![0, 1],
            coefficient: Coefficient::new(0.25, 4),
        });
        let spec = FunctionSpec::new(0, ActiveSet::new(vec![0, 1]), Expression::new(terms));
        let err = verifier().verify(&spec).unwrap_err();
        assert!(err.to_string().contains("coefficient"));
    }

    #[test]
    fn verify_missing_bookkeeping_fails() {
        let mut spec = valid_spec();
        spec.expression.terms.remove(1);
        assert!(verifier().verify(&spec).is_err());
    }

    #[test]
    fn verify_mismatched_bookkeeping_fails() {
        let mut spec = valid_spec();
        spec.expression.terms[1] = Term::Bookkeeping {
            coefficient: Coefficient::new(0.21, 3),
        };
        let err = verifier().verify(&spec).unwrap_err();
        assert!(err.to_string().contains("bookkeeping"));
    }
}
