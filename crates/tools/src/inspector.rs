use flycam_camera::{Camera, CameraSettings, EdgeFlags};

/// Camera inspector for developer tooling.
///
/// Read-only queries against the camera for overlays, logging and headless
/// output.
pub struct CameraInspector;

impl CameraInspector {
    /// Snapshot the camera state.
    pub fn summary(camera: &Camera) -> CameraSummary {
        let p = camera.position();
        let t = camera.target();
        let u = camera.up();
        let m = camera.mouse_position();
        CameraSummary {
            position: [p.x, p.y, p.z],
            target: [t.x, t.y, t.z],
            up: [u.x, u.y, u.z],
            horizontal_angle: camera.horizontal_angle(),
            vertical_angle: camera.vertical_angle(),
            mouse: [m.x, m.y],
            edges: camera.edges(),
            settings: *camera.settings(),
        }
    }

    /// Short label for the active edge-scroll directions, e.g. `"left+upper"`.
    pub fn edge_label(edges: EdgeFlags) -> String {
        if !edges.any() {
            return "none".into();
        }
        let names = [
            (edges.left, "left"),
            (edges.right, "right"),
            (edges.upper, "upper"),
            (edges.lower, "lower"),
        ];
        names
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// Camera state for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSummary {
    pub position: [f64; 3],
    pub target: [f64; 3],
    pub up: [f64; 3],
    pub horizontal_angle: f64,
    pub vertical_angle: f64,
    pub mouse: [f64; 2],
    pub edges: EdgeFlags,
    pub settings: CameraSettings,
}

impl std::fmt::Display for CameraSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Camera pos=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) h={:.1} v={:.1} edges={}",
            self.position[0],
            self.position[1],
            self.position[2],
            self.target[0],
            self.target[1],
            self.target[2],
            self.horizontal_angle,
            self.vertical_angle,
            CameraInspector::edge_label(self.edges),
        )
    }
}
