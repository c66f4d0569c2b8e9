//! wgpu render backend for the cube viewer.
//!
//! Draws 27 instances of one unit cubelet mesh: lit, color-tracked faces
//! with culling disabled, then dark border lines. The camera is fixed; the
//! assembly rotates in front of it.
//!
//! # Invariants
//! - Renderer never mutates interaction state.
//! - Mesh buffers are uploaded once; only uniforms and instances are
//!   rewritten per frame.

mod camera;
mod context;
mod error;
mod gpu;
mod shaders;

pub use camera::FixedCamera;
pub use context::GpuContext;
pub use error::GpuError;
pub use gpu::WgpuRenderer;
