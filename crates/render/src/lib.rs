//! Rendering Adapter: renderer-agnostic geometry, scene, and frame loop.
//!
//! # Invariants
//! - Cubelet geometry is generated once; the scene is 27 instances of it.
//! - Renderers read a [`Frame`] and never mutate interaction state.
//! - Once the loop exits, no further frame is drawn.

mod frame_loop;
mod mesh;
mod renderer;
mod scene;
mod view;

pub use frame_loop::{EventSource, FrameLoop, ScriptedEvents};
pub use mesh::{CORNERS, CubeletMesh, EDGES, FACE_QUADS, FaceVertex};
pub use renderer::{DebugTextRenderer, Frame, Renderer};
pub use scene::{CubeScene, CubeletInstance};
pub use view::{Lighting, NormalMode, ViewParams};

pub fn crate_info() -> &'static str {
    "rubik-render v0.1.0"
}
