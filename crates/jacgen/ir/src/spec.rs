//! Per-output function specifications.

use serde::{Deserialize, Serialize};

use crate::node::Node;
use crate::term::Term;

/// Input indices one output is allowed to reference, in draw order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSet(Vec<usize>);

impl ActiveSet {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Indices in the order they were drawn.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Ascending copy of the indices.
    pub fn sorted(&self) -> Vec<usize> {
        let mut v = self.0.clone();
        v.sort_unstable();
        v
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

/// Ordered terms of one output, joined by addition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub terms: Vec<Term>,
}

impl Expression {
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    /// Terms that are not bookkeeping fragments.
    pub fn logical_terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter().filter(|t| t.is_logical())
    }

    /// Lower every term and join them into a single sum.
    pub fn lower(&self) -> Node {
        Node::Sum(self.terms.iter().map(Term::lower).collect())
    }
}

/// Everything needed to emit one output of the generated function.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub output: usize,
    pub active: ActiveSet,
    pub expression: Expression,
}

impl FunctionSpec {
    pub fn new(output: usize, active: ActiveSet, expression: Expression) -> Self {
        Self {
            output,
            active,
            expression,
        }
    }
}
