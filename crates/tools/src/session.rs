use flycam_camera::{Camera, CameraError};
use flycam_common::Viewport;
use flycam_input::{Control, InputHandler, Key};
use flycam_render::{PipelineError, RenderView, TransformPipeline};
use glam::{DMat4, DVec2};

use crate::config::{ConfigError, DemoConfig};

/// Camera plus per-frame scene state, driven through [`InputHandler`].
///
/// The desktop app and headless replay both run the demo through this type;
/// only the drawing differs.
#[derive(Debug)]
pub struct DemoSession {
    config: DemoConfig,
    camera: Camera,
    viewport: Viewport,
    frame: u64,
    cursor_warp: Option<DVec2>,
}

impl DemoSession {
    pub fn new(config: DemoConfig) -> Result<Self, ConfigError> {
        let camera = config.build_camera()?;
        let viewport = config.viewport();
        // construction ran setup, so the pointer should start centered
        let cursor_warp = Some(camera.mouse_position());
        Ok(Self {
            config,
            camera,
            viewport,
            frame: 0,
            cursor_warp,
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Frames displayed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.resize(viewport);
    }

    /// Pending pointer warp from startup or `Home`, if not yet taken.
    pub fn take_cursor_warp(&mut self) -> Option<DVec2> {
        self.cursor_warp.take()
    }

    /// Transforms and light for the current frame.
    pub fn render_view(&self) -> RenderView {
        RenderView {
            pipeline: self.config.pipeline_config(self.viewport, self.frame),
            light: self.config.light,
        }
    }

    /// World-view-projection for the current frame.
    pub fn wvp(&self) -> Result<DMat4, PipelineError> {
        let view = self.render_view();
        TransformPipeline::new(&view.pipeline)
            .with_camera(&self.camera)
            .compose()
    }

    /// Object-to-world transform for the current frame.
    pub fn world_matrix(&self) -> DMat4 {
        let mut pipeline = self.render_view().pipeline;
        pipeline.projection = None;
        TransformPipeline::new(&pipeline).model_matrix()
    }
}

impl InputHandler for DemoSession {
    type Error = CameraError;

    fn on_keyboard(&mut self, key: Key) -> Result<Control, CameraError> {
        match key {
            Key::Quit => return Ok(Control::Exit),
            Key::Home => {
                self.cursor_warp = Some(self.camera.setup()?);
            }
            key if key.is_movement() => {
                self.camera.keyboard(key)?;
            }
            key => tracing::trace!(?key, "key ignored"),
        }
        Ok(Control::Continue)
    }

    fn on_mouse(&mut self, x: f64, y: f64) -> Result<(), CameraError> {
        self.camera.mouse(x, y)
    }

    fn on_display(&mut self) -> Result<(), CameraError> {
        self.camera.render()?;
        self.frame += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flycam_input::{InputEvent, replay};

    fn session() -> DemoSession {
        DemoSession::new(DemoConfig::default()).unwrap()
    }

    #[test]
    fn unmapped_key_leaves_camera_alone() {
        let mut s = session();
        let start = s.camera().position();
        assert_eq!(s.on_keyboard(Key::Other).unwrap(), Control::Continue);
        assert_eq!(s.camera().position(), start);
        assert!(s.take_cursor_warp().is_some());
        assert!(s.take_cursor_warp().is_none());
    }

    #[test]
    fn arrow_keys_move_camera() {
        let mut s = session();
        let start = s.camera().position();
        s.on_keyboard(Key::Up).unwrap();
        let moved = s.camera().position() - start;
        assert!((moved - s.camera().target()).length() < 1e-9);
    }

    #[test]
    fn quit_exits() {
        let mut s = session();
        assert_eq!(s.on_keyboard(Key::Quit).unwrap(), Control::Exit);
        assert_eq!(s.on_keyboard(Key::Other).unwrap(), Control::Continue);
    }

    #[test]
    fn new_session_requests_initial_warp() {
        let mut s = session();
        assert_eq!(s.take_cursor_warp(), Some(DVec2::new(600.0, 360.0)));
        assert_eq!(s.take_cursor_warp(), None);
    }

    #[test]
    fn home_requests_cursor_warp_to_center() {
        let mut s = session();
        s.take_cursor_warp();
        s.on_mouse(10.0, 10.0).unwrap();
        s.on_keyboard(Key::Home).unwrap();
        assert_eq!(s.take_cursor_warp(), Some(DVec2::new(600.0, 360.0)));
        assert_eq!(s.take_cursor_warp(), None);
        assert_eq!(s.camera().mouse_position(), DVec2::new(600.0, 360.0));
    }

    #[test]
    fn display_advances_frames_and_spin() {
        let mut config = DemoConfig::default();
        config.model.spin_rate = 1.0;
        let mut s = DemoSession::new(config).unwrap();
        let before = s.wvp().unwrap();
        s.on_display().unwrap();
        s.on_display().unwrap();
        assert_eq!(s.frame(), 2);
        let rotation = s.render_view().pipeline.rotation.unwrap();
        assert!((rotation.y - 32.0).abs() < 1e-9);
        assert_ne!(s.wvp().unwrap(), before);
    }

    #[test]
    fn world_matrix_places_pyramid_ahead() {
        let s = session();
        let origin = s.world_matrix().transform_point3(glam::DVec3::ZERO);
        assert!((origin - glam::DVec3::new(0.0, 0.0, 6.0)).length() < 1e-9);
    }

    #[test]
    fn resize_updates_projection() {
        let mut s = session();
        s.resize(Viewport::new(800, 600));
        let projection = s.render_view().pipeline.projection.unwrap();
        assert_eq!((projection.width, projection.height), (800.0, 600.0));
        assert_eq!(s.camera().viewport(), Viewport::new(800, 600));
    }

    #[test]
    fn replayed_script_drives_session() {
        let script: Vec<InputEvent> = serde_json::from_str(
            r#"[{"key": "up"}, {"mouse": {"x": 620.0, "y": 360.0}}, {"frames": 3}, {"key": "quit"}, {"key": "up"}]"#,
        )
        .unwrap();
        let mut s = session();
        let summary = replay(&mut s, &script).unwrap();
        assert!(summary.exited);
        assert_eq!(summary.keys, 2);
        assert_eq!(summary.frames, 3);
        assert_eq!(s.frame(), 3);
        assert!((s.camera().horizontal_angle() - 271.0).abs() < 1e-9);
    }
}
