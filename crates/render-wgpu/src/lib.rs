//! wgpu render backend for the flycam demo.
//!
//! Draws one textured pyramid with a single directional light. The
//! world-view-projection matrix comes from the transform pipeline each frame.
//!
//! # Invariants
//! - The backend never mutates the camera; it only receives matrices.
//! - The transform matrices are uploaded as composed, apart from the
//!   clip-depth remap into wgpu's `[0, 1]` range.

mod gpu;
mod mesh;
mod shaders;
mod texture;

pub use gpu::{FrameMatrices, WgpuRenderer};
pub use mesh::{Vertex, pyramid_mesh};
pub use texture::{TextureError, TextureImage};
