use serde::{Deserialize, Serialize};

/// Tunables for camera input handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// World units moved per arrow-key press.
    pub step_size: f64,
    /// Pixels of pointer motion per degree of rotation.
    pub mouse_sensitivity: f64,
    /// Distance in pixels from a viewport border that counts as "on the edge".
    pub edge_margin: f64,
    /// Degrees rotated per frame while the pointer rests on an edge.
    pub edge_step: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            step_size: 1.0,
            mouse_sensitivity: 20.0,
            edge_margin: 100.0,
            edge_step: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = CameraSettings::default();
        assert_eq!(s.step_size, 1.0);
        assert_eq!(s.mouse_sensitivity, 20.0);
        assert_eq!(s.edge_margin, 100.0);
        assert_eq!(s.edge_step, 0.1);
    }
}
