use flycam_common::{MathError, Vector3, Viewport, normalize, rotate, to_degree};
use flycam_input::Key;
use glam::DVec2;

use crate::settings::CameraSettings;

/// Below this cross-product length, target and up are treated as parallel.
const PARALLEL_EPSILON: f64 = 1e-9;

/// Errors from camera construction and updates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("degenerate vector: {0}")]
    DegenerateVector(#[from] MathError),
    #[error("invalid camera configuration: {0}")]
    InvalidConfiguration(String),
}

/// Which viewport borders the pointer is resting on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeFlags {
    pub upper: bool,
    pub lower: bool,
    pub left: bool,
    pub right: bool,
}

impl EdgeFlags {
    pub fn any(&self) -> bool {
        self.upper || self.lower || self.left || self.right
    }
}

/// Free-look camera.
///
/// Orientation is stored as two angles in degrees. `horizontal_angle` yaws
/// the world +X axis about world +Y; `vertical_angle` then pitches about the
/// resulting horizontal axis (positive looks down). `target` and `up` are
/// re-derived from the angles on every change.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vector3,
    target: Vector3,
    up: Vector3,
    viewport: Viewport,
    settings: CameraSettings,
    horizontal_angle: f64,
    vertical_angle: f64,
    mouse: DVec2,
    edges: EdgeFlags,
}

impl Camera {
    /// Create a camera with default [`CameraSettings`].
    pub fn new(
        position: Vector3,
        target: Vector3,
        up: Vector3,
        viewport: Viewport,
    ) -> Result<Self, CameraError> {
        Self::with_settings(position, target, up, viewport, CameraSettings::default())
    }

    /// Create a camera, normalize `target` and `up`, and run [`Camera::setup`].
    ///
    /// Fails when a setting is out of range, when either vector is zero, when
    /// they are parallel, or when `target` is vertical (no horizontal angle
    /// can be recovered).
    pub fn with_settings(
        position: Vector3,
        target: Vector3,
        up: Vector3,
        viewport: Viewport,
        settings: CameraSettings,
    ) -> Result<Self, CameraError> {
        validate_settings(&settings)?;
        let target = normalize(target)?;
        let up = normalize(up)?;
        if target.cross(up).length() < PARALLEL_EPSILON {
            return Err(CameraError::InvalidConfiguration(format!(
                "target {target} is parallel to up {up}"
            )));
        }

        let mut camera = Self {
            position,
            target,
            up,
            viewport,
            settings,
            horizontal_angle: 0.0,
            vertical_angle: 0.0,
            mouse: viewport.center(),
            edges: EdgeFlags::default(),
        };
        camera.setup()?;
        Ok(camera)
    }

    /// Recover the horizontal and vertical angles from the current target and
    /// re-center the tracked pointer.
    ///
    /// Returns the viewport center; the backend should warp the pointer there.
    pub fn setup(&mut self) -> Result<DVec2, CameraError> {
        let horizontal = normalize(Vector3::new(self.target.x, 0.0, self.target.z)).map_err(|_| {
            CameraError::InvalidConfiguration(format!(
                "target {} has no horizontal component",
                self.target
            ))
        })?;

        self.horizontal_angle = horizontal_angle_of(horizontal);
        self.vertical_angle = -to_degree(self.target.y.clamp(-1.0, 1.0).asin());
        self.mouse = self.viewport.center();

        tracing::debug!(
            horizontal = self.horizontal_angle,
            vertical = self.vertical_angle,
            "camera setup"
        );
        Ok(self.mouse)
    }

    /// Translate along the view direction (up/down) or sideways (left/right).
    ///
    /// Returns `Ok(false)` for keys the camera does not handle.
    pub fn keyboard(&mut self, key: Key) -> Result<bool, CameraError> {
        let step = self.settings.step_size;
        match key {
            Key::Up => self.position += self.target * step,
            Key::Down => self.position -= self.target * step,
            Key::Left => self.position += normalize(self.target.cross(self.up))? * step,
            Key::Right => self.position += normalize(self.up.cross(self.target))? * step,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Pointer moved to `(x, y)`: rotate by the pixel delta and refresh the
    /// edge flags.
    ///
    /// An axis with zero delta marks the pointer as resting on that axis'
    /// border if it is within the margin; any motion on the axis clears both
    /// of its flags.
    pub fn mouse(&mut self, x: f64, y: f64) -> Result<(), CameraError> {
        let pointer = DVec2::new(x, y);
        let delta = pointer - self.mouse;

        let sensitivity = self.settings.mouse_sensitivity;
        let horizontal = self.horizontal_angle + delta.x / sensitivity;
        let vertical = self.vertical_angle + delta.y / sensitivity;
        let (target, up) = orientation(horizontal, vertical)?;

        let margin = self.settings.edge_margin;
        let width = self.viewport.width as f64;
        let height = self.viewport.height as f64;
        let mut edges = self.edges;

        if delta.x == 0.0 {
            if x <= margin {
                edges.left = true;
            } else if x >= width - margin {
                edges.right = true;
            }
        } else {
            edges.left = false;
            edges.right = false;
        }

        if delta.y == 0.0 {
            if y <= margin {
                edges.upper = true;
            } else if y >= height - margin {
                edges.lower = true;
            }
        } else {
            edges.upper = false;
            edges.lower = false;
        }

        if edges != self.edges {
            tracing::trace!(edges = ?edges, "edge flags changed");
        }

        self.mouse = pointer;
        self.edges = edges;
        self.commit(horizontal, vertical, target, up);
        Ok(())
    }

    /// Per-frame tick: keep rotating while the pointer rests on an edge.
    ///
    /// Returns whether the orientation changed.
    pub fn render(&mut self) -> Result<bool, CameraError> {
        let step = self.settings.edge_step;
        let limit = 90.0 - step;
        let mut horizontal = self.horizontal_angle;
        let mut vertical = self.vertical_angle;
        let mut changed = false;

        if self.edges.left {
            horizontal -= step;
            changed = true;
        } else if self.edges.right {
            horizontal += step;
            changed = true;
        }

        if self.edges.upper && vertical > -limit {
            vertical = (vertical - step).max(-limit);
            changed = true;
        } else if self.edges.lower && vertical < limit {
            vertical = (vertical + step).min(limit);
            changed = true;
        }

        if changed {
            let (target, up) = orientation(horizontal, vertical)?;
            self.commit(horizontal, vertical, target, up);
        }
        Ok(changed)
    }

    /// Track a new window size for edge detection and re-centering.
    pub fn resize(&mut self, viewport: Viewport) {
        tracing::debug!(width = viewport.width, height = viewport.height, "camera viewport resized");
        self.viewport = viewport;
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Unit forward direction.
    pub fn target(&self) -> Vector3 {
        self.target
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    pub fn horizontal_angle(&self) -> f64 {
        self.horizontal_angle
    }

    pub fn vertical_angle(&self) -> f64 {
        self.vertical_angle
    }

    /// Last pointer position seen by [`Camera::mouse`].
    pub fn mouse_position(&self) -> DVec2 {
        self.mouse
    }

    pub fn edges(&self) -> EdgeFlags {
        self.edges
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    fn commit(&mut self, horizontal: f64, vertical: f64, target: Vector3, up: Vector3) {
        self.horizontal_angle = horizontal;
        self.vertical_angle = vertical;
        self.target = target;
        self.up = up;
    }
}

/// Target and up for the given angles: yaw world +X about world +Y, then
/// pitch about the horizontal axis.
fn orientation(horizontal: f64, vertical: f64) -> Result<(Vector3, Vector3), CameraError> {
    let vertical_axis = Vector3::Y;
    let view = normalize(rotate(Vector3::X, horizontal, vertical_axis))?;

    let horizontal_axis = normalize(vertical_axis.cross(view))?;
    let target = normalize(rotate(view, vertical, horizontal_axis))?;
    let up = normalize(target.cross(horizontal_axis))?;
    Ok((target, up))
}

fn validate_settings(settings: &CameraSettings) -> Result<(), CameraError> {
    let invalid = |field: &str, value: f64, expected: &str| {
        CameraError::InvalidConfiguration(format!("{field} must be {expected}, got {value}"))
    };
    if !settings.step_size.is_finite() {
        return Err(invalid("step_size", settings.step_size, "finite"));
    }
    if !settings.mouse_sensitivity.is_finite() || settings.mouse_sensitivity == 0.0 {
        return Err(invalid("mouse_sensitivity", settings.mouse_sensitivity, "finite and non-zero"));
    }
    if !settings.edge_margin.is_finite() {
        return Err(invalid("edge_margin", settings.edge_margin, "finite"));
    }
    if !(settings.edge_step > 0.0 && settings.edge_step < 90.0) {
        return Err(invalid("edge_step", settings.edge_step, "in (0, 90) degrees"));
    }
    Ok(())
}

/// Horizontal angle in degrees of a unit vector lying in the XZ plane,
/// resolved per quadrant.
fn horizontal_angle_of(h: Vector3) -> f64 {
    let asin_deg = |s: f64| to_degree(s.clamp(-1.0, 1.0).asin());
    match (h.z >= 0.0, h.x >= 0.0) {
        (true, true) => 360.0 - asin_deg(h.z),
        (true, false) => 180.0 + asin_deg(h.z),
        (false, true) => asin_deg(-h.z),
        (false, false) => 90.0 + asin_deg(-h.z),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: Vector3, b: Vector3) -> bool {
        (a - b).abs().max_element() < EPS
    }

    fn demo_camera() -> Camera {
        Camera::new(
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, -0.5, 1.0),
            Vector3::Y,
            Viewport::new(1200, 720),
        )
        .unwrap()
    }

    fn refresh(cam: &mut Camera) {
        let (target, up) = orientation(cam.horizontal_angle, cam.vertical_angle).unwrap();
        cam.target = target;
        cam.up = up;
    }

    fn assert_orthonormal(cam: &Camera) {
        assert!((cam.target().length() - 1.0).abs() < 1e-6);
        assert!((cam.up().length() - 1.0).abs() < 1e-6);
        assert!(cam.target().dot(cam.up()).abs() < 1e-6);
    }

    #[test]
    fn new_normalizes_inputs() {
        let cam = Camera::new(
            Vector3::ZERO,
            Vector3::new(0.0, 0.0, 5.0),
            Vector3::new(0.0, 2.0, 0.0),
            Viewport::default(),
        )
        .unwrap();
        assert!(approx(cam.target(), Vector3::Z));
        assert!(approx(cam.up(), Vector3::Y));
    }

    #[test]
    fn new_rejects_zero_target() {
        let err = Camera::new(Vector3::ZERO, Vector3::ZERO, Vector3::Y, Viewport::default())
            .unwrap_err();
        assert!(matches!(err, CameraError::DegenerateVector(_)));
    }

    #[test]
    fn new_rejects_target_parallel_to_up() {
        let err = Camera::new(
            Vector3::ZERO,
            Vector3::new(0.0, -3.0, 0.0),
            Vector3::Y,
            Viewport::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CameraError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("parallel"));
    }

    #[test]
    fn new_rejects_vertical_target() {
        let err = Camera::new(Vector3::ZERO, Vector3::Y, Vector3::X, Viewport::default())
            .unwrap_err();
        assert!(matches!(err, CameraError::InvalidConfiguration(_)));
    }

    #[test]
    fn setup_quadrant_table() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let cases = [
            (Vector3::new(s, 0.0, s), 315.0),
            (Vector3::new(-s, 0.0, s), 225.0),
            (Vector3::new(s, 0.0, -s), 45.0),
            (Vector3::new(-s, 0.0, -s), 135.0),
        ];
        for (target, expected) in cases {
            let cam = Camera::new(Vector3::ZERO, target, Vector3::Y, Viewport::default()).unwrap();
            assert!(
                (cam.horizontal_angle() - expected).abs() < EPS,
                "target={target} angle={}",
                cam.horizontal_angle()
            );
            assert!(cam.vertical_angle().abs() < EPS);
        }
    }

    #[test]
    fn setup_then_update_reproduces_target() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        for target in [
            Vector3::new(s, 0.0, s),
            Vector3::new(-s, 0.0, s),
            Vector3::new(s, 0.0, -s),
            Vector3::Z,
            Vector3::X,
        ] {
            let mut cam = Camera::new(Vector3::ZERO, target, Vector3::Y, Viewport::default()).unwrap();
            refresh(&mut cam);
            assert!(approx(cam.target(), target), "target={target} got={}", cam.target());
        }
    }

    #[test]
    fn third_quadrant_row_swaps_components() {
        // off the diagonal, the x<0,z<0 row comes back with x and z exchanged
        let mut cam = Camera::new(
            Vector3::ZERO,
            Vector3::new(-0.6, 0.0, -0.8),
            Vector3::Y,
            Viewport::default(),
        )
        .unwrap();
        refresh(&mut cam);
        assert!(approx(cam.target(), Vector3::new(-0.8, 0.0, -0.6)));
        assert_orthonormal(&cam);
    }

    #[test]
    fn setup_recovers_vertical_angle() {
        let mut cam = demo_camera();
        let expected_target = normalize(Vector3::new(0.0, -0.5, 1.0)).unwrap();
        let expected_v = -to_degree(expected_target.y.asin());
        assert!((cam.vertical_angle() - expected_v).abs() < EPS);
        assert!(cam.vertical_angle() > 0.0);
        assert!((cam.horizontal_angle() - 270.0).abs() < EPS);

        refresh(&mut cam);
        assert!(approx(cam.target(), expected_target));
        assert_orthonormal(&cam);
    }

    #[test]
    fn setup_recenters_pointer() {
        let mut cam = demo_camera();
        cam.mouse(10.0, 20.0).unwrap();
        let center = cam.setup().unwrap();
        assert_eq!(center, DVec2::new(600.0, 360.0));
        assert_eq!(cam.mouse_position(), center);
    }

    #[test]
    fn update_keeps_orthonormal_basis() {
        let mut samples = Vec::new();
        for i in -3..=3 {
            for j in -3..=3 {
                for k in -3..=3 {
                    samples.push(Vector3::new(i as f64, j as f64 * 0.7, k as f64 * 1.3));
                }
            }
        }
        let ups = [Vector3::Y, Vector3::new(0.2, 1.0, -0.1), Vector3::new(1.0, 0.5, 0.0)];

        let mut checked = 0;
        for t in &samples {
            for u in &ups {
                let Ok(mut cam) = Camera::new(Vector3::ZERO, *t, *u, Viewport::default()) else {
                    continue;
                };
                refresh(&mut cam);
                assert_orthonormal(&cam);
                checked += 1;
            }
        }
        assert!(checked > 500);
    }

    #[test]
    fn keyboard_up_then_down_returns_home() {
        let mut cam = demo_camera();
        let start = cam.position();
        assert!(cam.keyboard(Key::Up).unwrap());
        assert!(!approx(cam.position(), start));
        assert!(cam.keyboard(Key::Down).unwrap());
        assert!(approx(cam.position(), start));
    }

    #[test]
    fn keyboard_strafes_sideways() {
        let mut cam =
            Camera::new(Vector3::ZERO, Vector3::Z, Vector3::Y, Viewport::default()).unwrap();
        cam.keyboard(Key::Left).unwrap();
        assert!(approx(cam.position(), Vector3::new(-1.0, 0.0, 0.0)));
        cam.keyboard(Key::Right).unwrap();
        cam.keyboard(Key::Right).unwrap();
        assert!(approx(cam.position(), Vector3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn keyboard_uses_step_size() {
        let settings = CameraSettings {
            step_size: 2.5,
            ..CameraSettings::default()
        };
        let mut cam = Camera::with_settings(
            Vector3::ZERO,
            Vector3::Z,
            Vector3::Y,
            Viewport::default(),
            settings,
        )
        .unwrap();
        cam.keyboard(Key::Up).unwrap();
        assert!(approx(cam.position(), Vector3::new(0.0, 0.0, 2.5)));
    }

    #[test]
    fn keyboard_ignores_unknown_keys() {
        let mut cam = demo_camera();
        let start = cam.position();
        assert!(!cam.keyboard(Key::Other).unwrap());
        assert!(!cam.keyboard(Key::Home).unwrap());
        assert_eq!(cam.position(), start);
    }

    #[test]
    fn mouse_delta_scaled_by_sensitivity() {
        let mut cam = demo_camera();
        let h = cam.horizontal_angle();
        let v = cam.vertical_angle();
        cam.mouse(620.0, 320.0).unwrap();
        assert!((cam.horizontal_angle() - (h + 1.0)).abs() < EPS);
        assert!((cam.vertical_angle() - (v - 2.0)).abs() < EPS);
        assert_orthonormal(&cam);
    }

    #[test]
    fn left_edge_set_on_rest_and_cleared_on_motion() {
        let mut cam = demo_camera();
        cam.mouse(50.0, 360.0).unwrap();
        assert!(!cam.edges().left);

        cam.mouse(50.0, 360.0).unwrap();
        assert!(cam.edges().left);
        assert!(!cam.edges().upper && !cam.edges().lower && !cam.edges().right);

        cam.mouse(51.0, 360.0).unwrap();
        assert!(!cam.edges().left);
    }

    #[test]
    fn other_edges_detected() {
        let mut cam = demo_camera();
        cam.mouse(1150.0, 360.0).unwrap();
        cam.mouse(1150.0, 360.0).unwrap();
        assert!(cam.edges().right);

        cam.mouse(600.0, 40.0).unwrap();
        cam.mouse(600.0, 40.0).unwrap();
        assert!(cam.edges().upper);
        assert!(!cam.edges().right);

        cam.mouse(600.0, 700.0).unwrap();
        assert!(!cam.edges().upper);
        cam.mouse(600.0, 700.0).unwrap();
        assert!(cam.edges().lower);
    }

    #[test]
    fn render_without_edges_is_noop() {
        let mut cam = demo_camera();
        let target = cam.target();
        assert!(!cam.render().unwrap());
        assert_eq!(cam.target(), target);
    }

    #[test]
    fn render_scrolls_horizontally_on_left_edge() {
        let mut cam = demo_camera();
        cam.mouse(50.0, 360.0).unwrap();
        cam.mouse(50.0, 360.0).unwrap();
        let h = cam.horizontal_angle();
        let target = cam.target();

        assert!(cam.render().unwrap());
        assert!((cam.horizontal_angle() - (h - 0.1)).abs() < EPS);
        assert!(!approx(cam.target(), target));
        assert_orthonormal(&cam);
    }

    #[test]
    fn edge_scroll_clamps_vertical_angle() {
        let mut cam = demo_camera();
        cam.mouse(600.0, 50.0).unwrap();
        cam.mouse(600.0, 50.0).unwrap();
        assert!(cam.edges().upper);

        for _ in 0..2000 {
            cam.render().unwrap();
            assert!(cam.vertical_angle() >= -90.0 + 0.1 - EPS);
        }
        assert!((cam.vertical_angle() - (-89.9)).abs() < 1e-6);
        assert!(!cam.render().unwrap());
        assert_orthonormal(&cam);
    }

    #[test]
    fn mouse_drag_does_not_clamp_vertical_angle() {
        let mut cam = demo_camera();
        cam.mouse(600.0, 360.0 + 20.0 * 120.0).unwrap();
        assert!(cam.vertical_angle() > 90.0);
        assert_orthonormal(&cam);
    }

    #[test]
    fn resize_moves_edge_bounds() {
        let mut cam = demo_camera();
        cam.resize(Viewport::new(800, 600));
        cam.mouse(750.0, 300.0).unwrap();
        cam.mouse(750.0, 300.0).unwrap();
        assert!(cam.edges().right);
        assert_eq!(cam.setup().unwrap(), DVec2::new(400.0, 300.0));
    }

    fn camera_with(settings: CameraSettings) -> Result<Camera, CameraError> {
        Camera::with_settings(
            Vector3::ZERO,
            Vector3::Z,
            Vector3::Y,
            Viewport::default(),
            settings,
        )
    }

    #[test]
    fn with_settings_rejects_out_of_range_settings() {
        let base = CameraSettings::default();
        let cases = [
            ("mouse_sensitivity", CameraSettings { mouse_sensitivity: 0.0, ..base }),
            ("mouse_sensitivity", CameraSettings { mouse_sensitivity: f64::NAN, ..base }),
            ("edge_step", CameraSettings { edge_step: 0.0, ..base }),
            ("edge_step", CameraSettings { edge_step: 90.0, ..base }),
            ("edge_step", CameraSettings { edge_step: f64::INFINITY, ..base }),
            ("edge_margin", CameraSettings { edge_margin: f64::NAN, ..base }),
            ("step_size", CameraSettings { step_size: f64::NEG_INFINITY, ..base }),
        ];
        for (field, settings) in cases {
            let err = camera_with(settings).unwrap_err();
            assert!(matches!(err, CameraError::InvalidConfiguration(_)), "{field}: {err}");
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
    }

    #[test]
    fn with_settings_accepts_negative_sensitivity() {
        let settings = CameraSettings {
            mouse_sensitivity: -20.0,
            ..CameraSettings::default()
        };
        let mut cam = camera_with(settings).unwrap();
        let h = cam.horizontal_angle();
        let start = cam.mouse_position();
        cam.mouse(start.x + 20.0, start.y).unwrap();
        assert!((cam.horizontal_angle() - (h - 1.0)).abs() < EPS);
    }

    #[test]
    fn failed_mouse_update_leaves_state_untouched() {
        let mut cam = demo_camera();
        cam.mouse(50.0, 360.0).unwrap();
        cam.mouse(50.0, 360.0).unwrap();
        let (h, v) = (cam.horizontal_angle(), cam.vertical_angle());
        let (target, up) = (cam.target(), cam.up());
        let edges = cam.edges();

        assert!(cam.mouse(f64::NAN, 360.0).is_err());
        assert_eq!(cam.horizontal_angle(), h);
        assert_eq!(cam.vertical_angle(), v);
        assert_eq!(cam.target(), target);
        assert_eq!(cam.up(), up);
        assert_eq!(cam.edges(), edges);
        assert_eq!(cam.mouse_position(), DVec2::new(50.0, 360.0));

        cam.mouse(70.0, 360.0).unwrap();
        assert!((cam.horizontal_angle() - (h + 1.0)).abs() < EPS);
        assert_orthonormal(&cam);
        assert!(cam.render().is_ok());
    }
}
