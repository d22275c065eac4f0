//! Shared math for the flycam workspace: degree/radian conversion, vector
//! normalization and quaternion-based vector rotation.
//!
//! # Invariants
//! - Normalizing a zero-length vector is an error, never a silent default.
//! - `rotate` expects a unit-length axis; callers normalize first.

pub mod math;
pub mod quaternion;
pub mod types;

pub use math::{MathError, normalize, rotate, to_degree, to_radian};
pub use quaternion::Quaternion;
pub use types::{Vector3, Viewport};
