#![deny(unsafe_code)]
//! # jacgen-emit
//!
//! Renders function specs into a standalone C++ header.
//!
//! Each output is emitted twice: as a scalar accumulation block in
//! `test_fun` and as a `case` of the index-selected `cu_f0` routine used on
//! the CUDA path. Both come from the same [`jacgen_ir::Node`] tree and the
//! same expression printer, and are compared structurally before any text
//! is produced.

pub mod artifact;
pub mod backend;
pub mod error;
pub mod module;
pub mod printer;
pub mod scaffold;

pub use artifact::{ContentHash, ModuleArtifact};
pub use backend::{AcceleratedPrinter, Backend, HostPrinter, Routine, RoutinePrinter};
pub use error::{EmitError, EmitResult};
pub use module::{ModuleDims, ModuleEmitter, ModuleSource};
pub use printer::{CxxPrinter, ExprPrinter};
pub use scaffold::Scaffold;
