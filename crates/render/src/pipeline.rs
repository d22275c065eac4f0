use flycam_camera::Camera;
use flycam_common::{Vector3, Viewport};
use glam::DMat4;
use serde::{Deserialize, Serialize};

use crate::matrix::{self, MatrixConvention};

/// Errors from composing the transform.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error("no camera bound to the transform pipeline")]
    CameraNotBound,
    #[error("invalid camera configuration: {0}")]
    InvalidCameraConfiguration(String),
}

/// Perspective projection parameters. `fov` is the vertical field of view in
/// degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    pub width: f64,
    pub height: f64,
    pub z_near: f64,
    pub z_far: f64,
    pub fov: f64,
}

impl ProjectionParams {
    pub fn new(width: f64, height: f64, z_near: f64, z_far: f64, fov: f64) -> Self {
        Self {
            width,
            height,
            z_near,
            z_far,
            fov,
        }
    }

    /// Projection sized to a viewport.
    pub fn for_viewport(viewport: Viewport, z_near: f64, z_far: f64, fov: f64) -> Self {
        Self::new(
            viewport.width as f64,
            viewport.height.max(1) as f64,
            z_near,
            z_far,
            fov,
        )
    }
}

/// Every transform the pipeline recognizes. `None` means identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub scale: Option<Vector3>,
    /// Euler angles in degrees.
    pub rotation: Option<Vector3>,
    pub translation: Option<Vector3>,
    pub projection: Option<ProjectionParams>,
    pub convention: MatrixConvention,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scale(mut self, scale: Vector3) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_rotation(mut self, degrees: Vector3) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn with_translation(mut self, offset: Vector3) -> Self {
        self.translation = Some(offset);
        self
    }

    pub fn with_projection(mut self, projection: ProjectionParams) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn with_convention(mut self, convention: MatrixConvention) -> Self {
        self.convention = convention;
        self
    }
}

/// Per-frame compositor. Build one from a [`PipelineConfig`], bind the
/// camera, call [`TransformPipeline::compose`], drop it.
#[derive(Debug, Clone)]
pub struct TransformPipeline<'a> {
    scaling: DMat4,
    rotation: DMat4,
    translation: DMat4,
    projection: DMat4,
    camera: Option<&'a Camera>,
}

impl<'a> TransformPipeline<'a> {
    pub fn new(config: &PipelineConfig) -> Self {
        let convention = config.convention;
        Self {
            scaling: config
                .scale
                .map_or(DMat4::IDENTITY, |s| matrix::scaling(s, convention)),
            rotation: config
                .rotation
                .map_or(DMat4::IDENTITY, |r| matrix::rotation(r, convention)),
            translation: config
                .translation
                .map_or(DMat4::IDENTITY, matrix::translation),
            projection: config
                .projection
                .as_ref()
                .map_or(DMat4::IDENTITY, matrix::perspective),
            camera: None,
        }
    }

    pub fn with_camera(mut self, camera: &'a Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn set_camera(&mut self, camera: &'a Camera) {
        self.camera = Some(camera);
    }

    /// `P · T · R · S`, for configurations without a camera.
    pub fn model_matrix(&self) -> DMat4 {
        self.projection * self.translation * self.rotation * self.scaling
    }

    /// `P · T(-eye) · R(camera) · T · R · S`.
    pub fn compose(&self) -> Result<DMat4, PipelineError> {
        let camera = self.camera.ok_or_else(|| {
            tracing::warn!("compose called without a camera");
            PipelineError::CameraNotBound
        })?;
        let camera_translation = matrix::translation(-camera.position());
        let camera_rotation = matrix::camera_rotation(camera.target(), camera.up())?;
        Ok(self.projection
            * camera_translation
            * camera_rotation
            * self.translation
            * self.rotation
            * self.scaling)
    }
}
