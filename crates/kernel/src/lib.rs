//! Cube Kernel: the static 3x3x3 assembly and its face coloring.
//!
//! # Invariants
//! - Exactly 27 cubelets, generated once, never mutated.
//! - Only the exact center cubelet is internal.
//! - Face coloring is a pure function of position and scheme.

pub mod cube;

pub use cube::{CubeAssembly, Cubelet, ColorScheme, SPACING, is_internal};
