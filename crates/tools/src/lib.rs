//! Developer tooling: demo configuration files, the input-driven demo
//! session shared by the apps, and a read-only camera inspector.
//!
//! # Invariants
//! - Missing configuration fields fall back to the demo defaults.
//! - The inspector never mutates the camera.

pub mod config;
pub mod inspector;
pub mod session;

pub use config::{CameraConfig, ConfigError, DemoConfig, ModelConfig, WindowConfig};
pub use inspector::{CameraInspector, CameraSummary};
pub use session::DemoSession;

pub fn crate_info() -> &'static str {
    "flycam-tools v0.1.0"
}
