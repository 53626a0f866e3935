#![deny(unsafe_code)]
//! # jacgen-ir
//!
//! Intermediate representation for synthesized test functions.
//!
//! Synthesis produces [`Term`]s grouped into an [`Expression`] per output.
//! Every term lowers to a [`Node`] tree, which is what the per-backend
//! printers render. Keeping the tree explicit means host and accelerated
//! emission can be compared structurally instead of by string.

pub mod error;
pub mod node;
pub mod spec;
pub mod term;
pub mod verifier;

pub use error::{IrError, IrResult};
pub use node::{Intrinsic, LiteralStyle, Node};
pub use spec::{ActiveSet, Expression, FunctionSpec};
pub use term::{BinaryOp, Coefficient, Term, UnaryFn};
pub use verifier::{CoefficientBounds, SpecVerifier};
