#![deny(unsafe_code)]
//! # jacgen-synth
//!
//! Deterministic synthesis of test-function expressions.
//!
//! ## Pipeline
//!
//! 1. **Seed Stream** - every random draw flows through one seeded stream
//! 2. **Selector** - picks the active input variables for an output
//! 3. **Synthesizer** - builds the output's term sequence from that set
//!
//! The same [`GeneratorConfig`] always yields the same specs.

pub mod config;
pub mod error;
pub mod rng;
pub mod selector;
pub mod synthesizer;

pub use config::GeneratorConfig;
pub use error::{SynthError, SynthResult};
pub use rng::SeedStream;
pub use selector::ActiveVariableSelector;
pub use synthesizer::{ExpressionSynthesizer, TermKind};
