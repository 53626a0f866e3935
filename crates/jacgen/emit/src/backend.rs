//! Execution backends and their routine printers.

use jacgen_ir::Node;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::printer::{CxxPrinter, ExprPrinter};

/// Execution path a routine is emitted for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Backend {
    /// Scalar block inside `test_fun`.
    Host,
    /// `case` inside the index-selected CUDA routine.
    Accelerated,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => write!(f, "host"),
            Self::Accelerated => write!(f, "accelerated"),
        }
    }
}

/// One output's accumulation routine on one backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    pub backend: Backend,
    pub output: usize,
    /// Active inputs, ascending.
    pub active: Vec<usize>,
    pub expression: Node,
}

/// Renders routines for one backend.
pub trait RoutinePrinter {
    fn backend(&self) -> Backend;

    /// Append the routine to `out`.
    fn write_routine(&self, out: &mut String, routine: &Routine);
}

/// Loop accumulating the running mean of `expr` over `complexity` iterations.
fn write_accumulation(out: &mut String, indent: &str, expr: &str) {
    out.push_str(&format!(
        "{indent}for(int j = 0; j < complexity; j++){{\n\
         {indent}    acc = acc + ({expr}) / static_cast<double>(complexity);\n\
         {indent}}}\n"
    ));
}

/// Prints host blocks for `test_fun`.
#[derive(Clone, Debug, Default)]
pub struct HostPrinter {
    pub expr: CxxPrinter,
}

impl RoutinePrinter for HostPrinter {
    fn backend(&self) -> Backend {
        Backend::Host
    }

    fn write_routine(&self, out: &mut String, routine: &Routine) {
        let active = routine
            .active
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str("        \n");
        out.push_str(&format!(
            "        // Function output {} (depends on variables: [{}])\n",
            routine.output, active
        ));
        out.push_str("        acc = 0;\n");
        write_accumulation(out, "        ", &self.expr.print(&routine.expression));
        out.push_str(&format!("        res[{}] = acc;\n", routine.output));
    }
}

/// Prints `case` arms for the CUDA switch.
#[derive(Clone, Debug, Default)]
pub struct AcceleratedPrinter {
    pub expr: CxxPrinter,
}

impl RoutinePrinter for AcceleratedPrinter {
    fn backend(&self) -> Backend {
        Backend::Accelerated
    }

    fn write_routine(&self, out: &mut String, routine: &Routine) {
        out.push_str(&format!("        case {}:\n", routine.output));
        write_accumulation(out, "            ", &self.expr.print(&routine.expression));
        out.push_str("            break;\n");
    }
}
