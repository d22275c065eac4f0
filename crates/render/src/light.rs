use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The scene's single directional light.
///
/// `direction` is the direction the light travels; surfaces facing against
/// it receive the full diffuse term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalLight {
    pub color: Vec3,
    pub ambient_intensity: f32,
    pub diffuse_intensity: f32,
    pub direction: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            ambient_intensity: 0.3,
            diffuse_intensity: 0.7,
            direction: Vec3::new(-0.3, -1.0, 0.5),
        }
    }
}

impl DirectionalLight {
    /// Unit vector pointing from a surface toward the light.
    pub fn to_light(&self) -> Vec3 {
        (-self.direction).normalize_or_zero()
    }

    /// Light color reaching a surface with unit `normal`.
    ///
    /// Mirrors the fragment shader: ambient plus Lambertian diffuse.
    pub fn shade(&self, normal: Vec3) -> Vec3 {
        let diffuse = normal.dot(self.to_light()).max(0.0) * self.diffuse_intensity;
        self.color * (self.ambient_intensity + diffuse)
    }
}
