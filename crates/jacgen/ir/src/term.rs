//! Expression terms produced by synthesis.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::node::{Intrinsic, LiteralStyle, Node};

// ── Unary Functions ────────────────────────────────────────────────────

/// Unary functions a term may apply to a single input variable.
///
/// Every variant is domain-safe once lowered: roots and logarithms see a
/// strictly positive argument and exponentials see a shrunk one. Tangent
/// and arctangent are deliberately absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryFn {
    Sin,
    Cos,
    /// `sqrt(x*x + 0.01)`
    SqrtSafe,
    Abs,
    /// `log(x*x + 1.0)`
    LogSafe,
    /// `exp(x * 0.1)`
    ExpSafe,
}

impl UnaryFn {
    /// Option list for uniform draws. Order is part of the draw contract.
    pub const ALL: [UnaryFn; 6] = [
        UnaryFn::Sin,
        UnaryFn::Cos,
        UnaryFn::SqrtSafe,
        UnaryFn::Abs,
        UnaryFn::LogSafe,
        UnaryFn::ExpSafe,
    ];

    /// The math intrinsic this function is rendered with.
    pub fn intrinsic(self) -> Intrinsic {
        match self {
            UnaryFn::Sin => Intrinsic::Sin,
            UnaryFn::Cos => Intrinsic::Cos,
            UnaryFn::SqrtSafe => Intrinsic::Sqrt,
            UnaryFn::Abs => Intrinsic::Abs,
            UnaryFn::LogSafe => Intrinsic::Log,
            UnaryFn::ExpSafe => Intrinsic::Exp,
        }
    }

    /// Lower the wrapped argument for variable `var`.
    pub fn safe_argument(self, var: usize) -> Node {
        let square = || Node::binary(BinaryOp::Mul, Node::Var(var), Node::Var(var));
        match self {
            UnaryFn::Sin | UnaryFn::Cos | UnaryFn::Abs => Node::Var(var),
            UnaryFn::SqrtSafe => {
                Node::binary(BinaryOp::Add, square(), Node::fixed(0.01, 2))
            }
            UnaryFn::LogSafe => Node::binary(BinaryOp::Add, square(), Node::fixed(1.0, 1)),
            UnaryFn::ExpSafe => {
                Node::binary(BinaryOp::Mul, Node::Var(var), Node::fixed(0.1, 1))
            }
        }
    }
}

impl fmt::Display for UnaryFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sin => write!(f, "sin"),
            Self::Cos => write!(f, "cos"),
            Self::SqrtSafe => write!(f, "sqrt_safe"),
            Self::Abs => write!(f, "abs"),
            Self::LogSafe => write!(f, "log_safe"),
            Self::ExpSafe => write!(f, "exp_safe"),
        }
    }
}

// ── Binary Operators ───────────────────────────────────────────────────

/// Binary arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
}

impl BinaryOp {
    /// Option list for uniform draws. Order is part of the draw contract.
    pub const ALL: [BinaryOp; 3] = [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul];

    /// Factor applied to a drawn coefficient before it is stored.
    ///
    /// Multiplication shrinks its coefficient to bound magnitude growth.
    pub fn coefficient_scale(self) -> f64 {
        match self {
            BinaryOp::Mul => 0.05,
            BinaryOp::Add | BinaryOp::Sub => 1.0,
        }
    }

    /// Decimal places of the printed coefficient.
    pub fn coefficient_decimals(self) -> u8 {
        match self {
            BinaryOp::Mul => 4,
            BinaryOp::Add | BinaryOp::Sub => 3,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ── Coefficient ────────────────────────────────────────────────────────

/// A term coefficient and the fixed precision its primary fragment uses.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    pub value: f64,
    /// Decimal places in the primary fragment.
    pub decimals: u8,
}

impl Coefficient {
    pub fn new(value: f64, decimals: u8) -> Self {
        Self { value, decimals }
    }

    /// Literal for the primary fragment.
    pub fn primary(&self) -> Node {
        Node::fixed(self.value, self.decimals)
    }

    /// Literal for the bookkeeping fragment, printed at full precision.
    pub fn full(&self) -> Node {
        Node::Literal {
            value: self.value,
            style: LiteralStyle::Shortest,
        }
    }
}

// ── Term ───────────────────────────────────────────────────────────────

/// One fragment of an output expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Term {
    Unary {
        function: UnaryFn,
        variable: usize,
        coefficient: Coefficient,
    },
    Binary {
        op: BinaryOp,
        lhs: usize,
        rhs: usize,
        coefficient: Coefficient,
    },
    Product {
        variables: Vec<usize>,
        coefficient: Coefficient,
    },
    /// Appended after every logical term with that term's coefficient.
    Bookkeeping { coefficient: Coefficient },
}

impl Term {
    pub fn coefficient(&self) -> &Coefficient {
        match self {
            Term::Unary { coefficient, .. }
            | Term::Binary { coefficient, .. }
            | Term::Product { coefficient, .. }
            | Term::Bookkeeping { coefficient } => coefficient,
        }
    }

    /// Whether this is a logical (non-bookkeeping) term.
    pub fn is_logical(&self) -> bool {
        !matches!(self, Term::Bookkeeping { .. })
    }

    /// Input indices referenced by this term, in reference order.
    pub fn variables(&self) -> Vec<usize> {
        match self {
            Term::Unary { variable, .. } => vec![*variable],
            Term::Binary { lhs, rhs, .. } => vec![*lhs, *rhs],
            Term::Product { variables, .. } => variables.clone(),
            Term::Bookkeeping { .. } => Vec::new(),
        }
    }

    /// Lower this term into a node tree.
    ///
    /// Every logical term is scaled by the iteration modulation factor, then
    /// by its coefficient.
    pub fn lower(&self) -> Node {
        match self {
            Term::Unary {
                function,
                variable,
                coefficient,
            } => Node::Product(vec![
                Node::Call(function.intrinsic(), Box::new(function.safe_argument(*variable))),
                Node::Modulation,
                coefficient.primary(),
            ]),
            Term::Binary {
                op,
                lhs,
                rhs,
                coefficient,
            } => Node::Product(vec![
                Node::Group(Box::new(Node::binary(
                    *op,
                    Node::Var(*lhs),
                    Node::Var(*rhs),
                ))),
                Node::Modulation,
                coefficient.primary(),
            ]),
            Term::Product {
                variables,
                coefficient,
            } => Node::Product(vec![
                Node::Group(Box::new(Node::Product(
                    variables.iter().map(|&v| Node::Var(v)).collect(),
                ))),
                Node::Modulation,
                coefficient.primary(),
            ]),
            Term::Bookkeeping { coefficient } => {
                Node::Product(vec![Node::Modulation, coefficient.full()])
            }
        }
    }
}
