//! Free-look camera: converts key presses and pointer motion into a
//! position and an orthonormal forward/up pair.
//!
//! # Invariants
//! - After every orientation update, `target` and `up` are unit length and
//!   perpendicular.
//! - Edge-scroll keeps the vertical angle strictly inside (-90, 90); direct
//!   mouse drag does not clamp it.
//! - The camera is owned by the render loop and mutated on one thread.

pub mod camera;
pub mod settings;

pub use camera::{Camera, CameraError, EdgeFlags};
pub use settings::CameraSettings;
