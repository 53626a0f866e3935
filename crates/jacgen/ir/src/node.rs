//! Expression tree rendered by backend printers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::term::BinaryOp;

/// Math intrinsics available to both execution paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intrinsic {
    Sin,
    Cos,
    Sqrt,
    Abs,
    Log,
    Exp,
}

impl Intrinsic {
    pub fn name(self) -> &'static str {
        match self {
            Intrinsic::Sin => "sin",
            Intrinsic::Cos => "cos",
            Intrinsic::Sqrt => "sqrt",
            Intrinsic::Abs => "abs",
            Intrinsic::Log => "log",
            Intrinsic::Exp => "exp",
        }
    }
}

impl fmt::Display for Intrinsic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a numeric literal is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralStyle {
    /// Fixed number of decimal places.
    Fixed(u8),
    /// Shortest text that round-trips to the same `f64`.
    Shortest,
}

/// A node in an output expression tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Input variable `x[i]`.
    Var(usize),
    Literal { value: f64, style: LiteralStyle },
    /// Iteration counter modulo 10, as a double.
    Modulation,
    Call(Intrinsic, Box<Node>),
    /// Infix operation, printed without parentheses.
    Binary(BinaryOp, Box<Node>, Box<Node>),
    /// Parenthesised sub-expression.
    Group(Box<Node>),
    /// Factors joined by `*`.
    Product(Vec<Node>),
    /// Terms joined by `+`.
    Sum(Vec<Node>),
}

impl Node {
    pub fn binary(op: BinaryOp, lhs: Node, rhs: Node) -> Self {
        Node::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn fixed(value: f64, decimals: u8) -> Self {
        Node::Literal {
            value,
            style: LiteralStyle::Fixed(decimals),
        }
    }

    /// Every variable index in the tree, depth-first.
    pub fn variables(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut Vec<usize>) {
        match self {
            Node::Var(i) => out.push(*i),
            Node::Literal { .. } | Node::Modulation => {}
            Node::Call(_, arg) | Node::Group(arg) => arg.collect_variables(out),
            Node::Binary(_, lhs, rhs) => {
                lhs.collect_variables(out);
                rhs.collect_variables(out);
            }
            Node::Product(children) | Node::Sum(children) => {
                for child in children {
                    child.collect_variables(out);
                }
            }
        }
    }
}
