//! Demo configuration, loaded from JSON.
//!
//! Every field is optional in the file; omitted fields take the values the
//! demo ships with (1200x720 window, camera at `(0, 1, 0)` looking along
//! `(0, -0.5, 1)`, pyramid six units ahead turned 30 degrees).

use std::path::{Path, PathBuf};

use flycam_camera::{Camera, CameraError, CameraSettings};
use flycam_common::{Vector3, Viewport};
use flycam_render::{DirectionalLight, MatrixConvention, PipelineConfig, ProjectionParams};
use serde::{Deserialize, Serialize};

/// Errors from loading or applying a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Camera(#[from] CameraError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Borderless fullscreen on the current monitor.
    pub fullscreen: bool,
    /// RGBA, each channel in `[0, 1]`.
    pub clear_color: [f64; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Flycam".into(),
            width: 1200,
            height: 720,
            fullscreen: false,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vector3,
    /// Look direction; normalized by the camera.
    pub target: Vector3,
    pub up: Vector3,
    pub settings: CameraSettings,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 1.0, 0.0),
            target: Vector3::new(0.0, -0.5, 1.0),
            up: Vector3::Y,
            settings: CameraSettings::default(),
        }
    }
}

/// Object transform and projection for the pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub scale: Option<Vector3>,
    /// Euler angles in degrees.
    pub rotation: Option<Vector3>,
    pub translation: Option<Vector3>,
    pub z_near: f64,
    pub z_far: f64,
    /// Vertical field of view in degrees.
    pub fov: f64,
    /// Degrees added to the Y rotation every frame.
    pub spin_rate: f64,
    pub convention: MatrixConvention,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            scale: None,
            rotation: Some(Vector3::new(0.0, 30.0, 0.0)),
            translation: Some(Vector3::new(0.0, 0.0, 6.0)),
            z_near: 1.0,
            z_far: 100.0,
            fov: 60.0,
            spin_rate: 0.0,
            convention: MatrixConvention::Standard,
        }
    }
}

/// Top-level demo configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub model: ModelConfig,
    pub light: DirectionalLight,
    /// Image for the pyramid; a checkerboard is generated when unset.
    pub texture: Option<PathBuf>,
}

impl DemoConfig {
    /// Read a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.window.width, self.window.height)
    }

    /// Build the camera for the configured window, failing on bad vectors.
    pub fn build_camera(&self) -> Result<Camera, ConfigError> {
        let c = &self.camera;
        Ok(Camera::with_settings(
            c.position,
            c.target,
            c.up,
            self.viewport(),
            c.settings,
        )?)
    }

    /// Pipeline configuration for `frame`, with projection sized to `viewport`.
    pub fn pipeline_config(&self, viewport: Viewport, frame: u64) -> PipelineConfig {
        let m = &self.model;
        let spin = m.spin_rate * frame as f64;
        let rotation = match m.rotation {
            Some(r) => Some(r + Vector3::new(0.0, spin, 0.0)),
            None if spin != 0.0 => Some(Vector3::new(0.0, spin, 0.0)),
            None => None,
        };

        PipelineConfig {
            scale: m.scale,
            rotation,
            translation: m.translation,
            ..PipelineConfig::new()
                .with_projection(ProjectionParams::for_viewport(
                    viewport, m.z_near, m.z_far, m.fov,
                ))
                .with_convention(m.convention)
        }
    }
}
