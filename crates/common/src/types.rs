use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Three-component vector used throughout the camera and pipeline math.
pub type Vector3 = DVec3;

/// Window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel at the middle of the viewport (integer halving).
    pub fn center(&self) -> DVec2 {
        DVec2::new((self.width / 2) as f64, (self.height / 2) as f64)
    }

    /// Width over height. A zero height is treated as one pixel.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 720,
        }
    }
}
