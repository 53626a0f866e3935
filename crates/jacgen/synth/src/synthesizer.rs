//! Expression synthesis: turns an active set into a term sequence.
//!
//! Draw order is fixed per term kind:
//!
//! - unary: kind, function, variable, coefficient
//! - binary: kind, lhs, rhs, operator, coefficient
//! - product: kind, arity, variables, coefficient
//!
//! Changing the order changes every artifact produced from a given seed.

use jacgen_ir::{ActiveSet, BinaryOp, Coefficient, CoefficientBounds, Expression, Term, UnaryFn};
use serde::{Deserialize, Serialize};

use crate::error::SynthResult;
use crate::rng::SeedStream;

/// Decimal places for unary coefficients.
const UNARY_DECIMALS: u8 = 3;
/// Decimal places for product coefficients.
const PRODUCT_DECIMALS: u8 = 4;
/// Largest number of factors in a product term.
const MAX_PRODUCT_ARITY: usize = 3;

// ── Term Kinds ─────────────────────────────────────────────────────────

/// Category of a logical term.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermKind {
    Unary,
    Binary,
    Product,
}

impl TermKind {
    /// Option list for uniform draws. Order is part of the draw contract.
    pub const ALL: [TermKind; 3] = [TermKind::Unary, TermKind::Binary, TermKind::Product];

    /// Kinds drawable for an active set of `active_len` variables.
    ///
    /// A product needs two distinct factors, so single-variable sets draw
    /// only unary and binary terms.
    pub fn eligible(active_len: usize) -> &'static [TermKind] {
        if active_len >= 2 {
            &Self::ALL
        } else {
            &Self::ALL[..2]
        }
    }
}

// ── Synthesizer ────────────────────────────────────────────────────────

/// Builds output expressions from an active variable set.
#[derive(Clone, Debug)]
pub struct ExpressionSynthesizer {
    bounds: CoefficientBounds,
}

impl Default for ExpressionSynthesizer {
    fn default() -> Self {
        Self::new(CoefficientBounds::default())
    }
}

impl ExpressionSynthesizer {
    pub fn new(bounds: CoefficientBounds) -> Self {
        Self { bounds }
    }

    /// Synthesize `expr_length` logical terms over `active`.
    ///
    /// Each logical term is followed by its bookkeeping fragment, so the
    /// returned expression holds `2 × expr_length` terms.
    pub fn synthesize(
        &self,
        stream: &mut SeedStream,
        active: &ActiveSet,
        expr_length: usize,
    ) -> SynthResult<Expression> {
        let kinds = TermKind::eligible(active.len());
        let mut terms = Vec::with_capacity(expr_length * 2);

        for _ in 0..expr_length {
            let term = match stream.choose(kinds)? {
                TermKind::Unary => self.unary(stream, active)?,
                TermKind::Binary => self.binary(stream, active)?,
                TermKind::Product => self.product(stream, active)?,
            };
            let coefficient = *term.coefficient();
            terms.push(term);
            terms.push(Term::Bookkeeping { coefficient });
        }

        Ok(Expression::new(terms))
    }

    fn draw_coefficient(&self, stream: &mut SeedStream) -> SynthResult<f64> {
        stream.uniform(self.bounds.min, self.bounds.max)
    }

    fn unary(&self, stream: &mut SeedStream, active: &ActiveSet) -> SynthResult<Term> {
        let function = stream.choose(&UnaryFn::ALL)?;
        let variable = stream.choose(active.indices())?;
        let value = self.draw_coefficient(stream)?;
        Ok(Term::Unary {
            function,
            variable,
            coefficient: Coefficient::new(value, UNARY_DECIMALS),
        })
    }

    fn binary(&self, stream: &mut SeedStream, active: &ActiveSet) -> SynthResult<Term> {
        let lhs = stream.choose(active.indices())?;
        let rhs = stream.choose(active.indices())?;
        let op = stream.choose(&BinaryOp::ALL)?;
        let value = self.draw_coefficient(stream)? * op.coefficient_scale();
        Ok(Term::Binary {
            op,
            lhs,
            rhs,
            coefficient: Coefficient::new(value, op.coefficient_decimals()),
        })
    }

    fn product(&self, stream: &mut SeedStream, active: &ActiveSet) -> SynthResult<Term> {
        let arity = stream.int_in(2, active.len().min(MAX_PRODUCT_ARITY))?;
        let variables = stream.sample(active.indices(), arity)?;
        let value = self.draw_coefficient(stream)? / (arity * arity) as f64;
        Ok(Term::Product {
            variables,
            coefficient: Coefficient::new(value, PRODUCT_DECIMALS),
        })
    }
}
