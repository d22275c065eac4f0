use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use flycam_input::{InputEvent, replay};
use flycam_render::{DebugTextRenderer, Renderer};
use flycam_tools::{CameraInspector, DemoConfig, DemoSession};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flycam-cli", about = "Headless flycam driver")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Viewport height in pixels
    #[arg(long, global = true)]
    height: Option<u32>,

    /// Decimal places for matrix output
    #[arg(long, default_value = "4", global = true)]
    precision: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the camera state and world-view-projection matrix
    Wvp {
        /// Frames to advance first (applies spin and edge scroll)
        #[arg(short, long, default_value = "0")]
        frames: u32,
    },
    /// Replay a JSON list of input events and print the final state
    Replay {
        /// Event script, e.g. `[{"key": "up"}, {"mouse": {"x": 50, "y": 360}}, {"frames": 10}]`
        script: PathBuf,
    },
    /// Print the effective configuration as JSON
    Config,
}

impl Cli {
    fn demo_config(&self) -> anyhow::Result<DemoConfig> {
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
        Ok(config)
    }
}

fn print_state(session: &DemoSession, precision: usize) -> anyhow::Result<()> {
    let renderer = DebugTextRenderer::new().with_precision(precision);
    print!("{}", renderer.render(session.camera(), &session.render_view())?);
    println!("{}", CameraInspector::summary(session.camera()));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match &cli.command {
        Commands::Info => {
            println!("flycam-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", flycam_render::crate_info());
            println!("tools: {}", flycam_tools::crate_info());
            let config = DemoConfig::default();
            println!(
                "defaults: {}x{} fov={} near={} far={}",
                config.window.width,
                config.window.height,
                config.model.fov,
                config.model.z_near,
                config.model.z_far
            );
        }
        Commands::Wvp { frames } => {
            let mut session = DemoSession::new(cli.demo_config()?)?;
            let summary = replay(&mut session, &[InputEvent::Frames(*frames)])?;
            tracing::debug!("advanced {} frames", summary.frames);
            print_state(&session, cli.precision)?;
        }
        Commands::Replay { script } => {
            let text = std::fs::read_to_string(script)
                .with_context(|| format!("cannot read script {}", script.display()))?;
            let events: Vec<InputEvent> = serde_json::from_str(&text)
                .with_context(|| format!("invalid event script {}", script.display()))?;

            let mut session = DemoSession::new(cli.demo_config()?)?;
            let summary = replay(&mut session, &events)?;
            println!(
                "Replayed {} events: keys={} mouse={} frames={}{}",
                events.len(),
                summary.keys,
                summary.mouse_moves,
                summary.frames,
                if summary.exited { " (quit)" } else { "" }
            );
            print_state(&session, cli.precision)?;
        }
        Commands::Config => {
            println!("{}", cli.demo_config()?.to_json()?);
        }
    }

    Ok(())
}
