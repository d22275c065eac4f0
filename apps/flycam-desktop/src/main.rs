use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use flycam_common::Viewport;
use flycam_input::{Control, InputHandler, Key};
use flycam_render_wgpu::{FrameMatrices, TextureImage, WgpuRenderer};
use flycam_tools::{CameraInspector, DemoConfig, DemoSession};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

#[derive(Parser)]
#[command(name = "flycam-desktop", about = "Free-look camera demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Image applied to the pyramid
    #[arg(long)]
    texture: Option<PathBuf>,
}

impl Cli {
    fn demo_config(&self) -> Result<DemoConfig> {
        let mut config = match &self.config {
            Some(path) => DemoConfig::load(path)?,
            None => DemoConfig::default(),
        };
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(texture) = &self.texture {
            config.texture = Some(texture.clone());
        }
        Ok(config)
    }
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::F1 | KeyCode::Escape => Key::Quit,
        _ => Key::Other,
    }
}

/// Application state.
struct AppState {
    session: DemoSession,
    show_inspector: bool,
}

impl AppState {
    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_inspector {
            return;
        }

        let summary = CameraInspector::summary(self.session.camera());

        egui::Window::new("Camera")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Position: ({:.2}, {:.2}, {:.2})",
                    summary.position[0], summary.position[1], summary.position[2]
                ));
                ui.label(format!(
                    "Target: ({:.3}, {:.3}, {:.3})",
                    summary.target[0], summary.target[1], summary.target[2]
                ));
                ui.label(format!(
                    "Up: ({:.3}, {:.3}, {:.3})",
                    summary.up[0], summary.up[1], summary.up[2]
                ));
                ui.label(format!(
                    "Angles: h={:.2} v={:.2}",
                    summary.horizontal_angle, summary.vertical_angle
                ));
                ui.label(format!(
                    "Pointer: ({:.0}, {:.0})  Edges: {}",
                    summary.mouse[0],
                    summary.mouse[1],
                    CameraInspector::edge_label(summary.edges)
                ));
                ui.label(format!(
                    "Sensitivity: {:.1} px/deg  Edge step: {:.2} deg",
                    summary.settings.mouse_sensitivity, summary.settings.edge_step
                ));
                ui.label(format!("Frame: {}", self.session.frame()));
                ui.separator();
                ui.small("Arrows: Move | Home: Re-center | F2: Inspector | F1/Esc: Quit");
            });
    }
}

struct GpuApp {
    state: AppState,
    texture: TextureImage,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(session: DemoSession, texture: TextureImage) -> Self {
        Self {
            state: AppState {
                session,
                show_inspector: true,
            },
            texture,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        if code == KeyCode::F2 {
            self.state.show_inspector = !self.state.show_inspector;
            return;
        }

        match self.state.session.on_keyboard(map_key(code)) {
            Ok(Control::Exit) => {
                tracing::info!("quit requested");
                event_loop.exit();
            }
            Ok(Control::Continue) => self.warp_cursor(),
            Err(e) => tracing::error!("keyboard: {e}"),
        }
    }

    fn warp_cursor(&mut self) {
        let (Some(window), Some(center)) = (&self.window, self.state.session.take_cursor_warp())
        else {
            return;
        };
        if let Err(e) = window.set_cursor_position(PhysicalPosition::new(center.x, center.y)) {
            tracing::warn!("cannot warp pointer: {e}");
        }
    }

    fn redraw(&mut self) {
        if let Err(e) = self.state.session.on_display() {
            tracing::error!("display: {e}");
            return;
        }

        let frame = match self.state.session.wvp() {
            Ok(wvp) => FrameMatrices {
                wvp,
                world: self.state.session.world_matrix(),
            },
            Err(e) => {
                tracing::error!("transform: {e}");
                return;
            }
        };

        let (Some(surface), Some(device), Some(queue), Some(config)) =
            (&self.surface, &self.device, &self.queue, &self.config)
        else {
            return;
        };

        let output = match surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                surface.configure(device, config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        if let Some(renderer) = &self.renderer {
            let demo = self.state.session.config();
            renderer.render(
                device,
                queue,
                &view,
                &frame,
                &demo.light,
                demo.window.clear_color,
            );
        }

        if let (Some(window), Some(egui_winit), Some(egui_renderer)) =
            (&self.window, &mut self.egui_winit, &mut self.egui_renderer)
        {
            let raw_input = egui_winit.take_egui_input(window);
            let state = &mut self.state;
            let full_output = self.egui_ctx.run(raw_input, |ctx| {
                state.draw_ui(ctx);
            });
            egui_winit.handle_platform_output(window, full_output.platform_output);

            let paint_jobs = self
                .egui_ctx
                .tessellate(full_output.shapes, full_output.pixels_per_point);

            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [config.width, config.height],
                pixels_per_point: full_output.pixels_per_point,
            };

            for (id, image_delta) in &full_output.textures_delta.set {
                egui_renderer.update_texture(device, queue, *id, image_delta);
            }
            let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
            egui_renderer.update_buffers(
                device,
                queue,
                &mut encoder,
                &paint_jobs,
                &screen_descriptor,
            );
            {
                let mut pass = encoder
                    .begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("egui_pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: None,
                        ..Default::default()
                    })
                    .forget_lifetime();
                egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
            }
            queue.submit(std::iter::once(encoder.finish()));
            for id in &full_output.textures_delta.free {
                egui_renderer.free_texture(id);
            }
        }

        output.present();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_config = &self.state.session.config().window;
        let attrs = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height))
            .with_fullscreen(window_config.fullscreen.then(|| Fullscreen::Borderless(None)));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("flycam_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state
            .session
            .resize(Viewport::new(config.width, config.height));

        let renderer = WgpuRenderer::new(
            &device,
            &queue,
            surface_format,
            config.width,
            config.height,
            &self.texture,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        self.warp_cursor();

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state
                        .session
                        .resize(Viewport::new(config.width, config.height));
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.handle_key(event_loop, key);
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Err(e) = self.state.session.on_mouse(position.x, position.y) {
                    tracing::error!("mouse: {e}");
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("flycam-desktop starting");

    let config = cli.demo_config()?;
    let texture = match &config.texture {
        Some(path) => TextureImage::load(path)?,
        None => TextureImage::checkerboard(256, 8),
    };
    let session = DemoSession::new(config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(session, texture);
    event_loop.run_app(&mut app)?;

    Ok(())
}
