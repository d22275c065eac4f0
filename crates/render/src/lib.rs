//! Transform pipeline: composes scale, rotation, translation, camera and
//! projection into the world-view-projection matrix uploaded every frame.
//!
//! # Invariants
//! - `WVP = P · T(-eye) · R(camera) · T · R · S`; callers depend on this order.
//! - Any transform left unset contributes the identity.
//! - The pipeline reads the camera, never mutates it.

pub mod light;
pub mod matrix;
mod pipeline;
mod renderer;

pub use light::DirectionalLight;
pub use matrix::{MatrixConvention, from_rows, to_row_major};
pub use pipeline::{PipelineConfig, PipelineError, ProjectionParams, TransformPipeline};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "flycam-render v0.1.0"
}
