use flycam_camera::Camera;

use crate::light::DirectionalLight;
use crate::pipeline::{PipelineConfig, PipelineError, TransformPipeline};

/// Per-frame scene parameters alongside the camera.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderView {
    pub pipeline: PipelineConfig,
    pub light: DirectionalLight,
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the camera and the view, composes the transform and
/// produces output. It never mutates the camera.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, camera: &Camera, view: &RenderView) -> Result<Self::Output, PipelineError>;
}

/// Text renderer for headless runs and logging.
///
/// Produces a human-readable dump of the camera state and the composed
/// world-view-projection matrix.
#[derive(Debug)]
pub struct DebugTextRenderer {
    precision: usize,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self { precision: 4 }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decimal places for matrix entries.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, camera: &Camera, view: &RenderView) -> Result<String, PipelineError> {
        let wvp = TransformPipeline::new(&view.pipeline)
            .with_camera(camera)
            .compose()?;

        let p = camera.position() + 0.0;
        let t = camera.target() + 0.0;
        let u = camera.up() + 0.0;
        let mut out = String::new();
        out.push_str("=== Camera ===\n");
        out.push_str(&format!("position=({:.3}, {:.3}, {:.3})\n", p.x, p.y, p.z));
        out.push_str(&format!("target=({:.3}, {:.3}, {:.3})\n", t.x, t.y, t.z));
        out.push_str(&format!("up=({:.3}, {:.3}, {:.3})\n", u.x, u.y, u.z));
        out.push_str(&format!(
            "angles: horizontal={:.2} vertical={:.2}\n",
            camera.horizontal_angle(),
            camera.vertical_angle()
        ));
        out.push_str("=== WVP (row-major) ===\n");
        for r in 0..4 {
            // adding zero folds -0.0 into 0.0 so it prints without a sign
            let row = wvp.row(r) + 0.0;
            out.push_str(&format!(
                "[{:>w$.p$}, {:>w$.p$}, {:>w$.p$}, {:>w$.p$}]\n",
                row.x,
                row.y,
                row.z,
                row.w,
                w = self.precision + 4,
                p = self.precision
            ));
        }
        Ok(out)
    }
}
