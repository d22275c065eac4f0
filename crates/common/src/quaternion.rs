use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::math::{MathError, to_radian};
use crate::types::Vector3;

/// Minimal quaternion used for rotating vectors.
///
/// Only lives for the duration of a [`crate::rotate`] call; nothing in the
/// workspace stores one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation by `degrees` about a unit `axis`, built from the half angle.
    pub fn from_axis_angle(axis: Vector3, degrees: f64) -> Self {
        let half = to_radian(degrees / 2.0);
        let (sin_half, cos_half) = half.sin_cos();
        Self::new(
            axis.x * sin_half,
            axis.y * sin_half,
            axis.z * sin_half,
            cos_half,
        )
    }

    /// Negate the vector part.
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Divide all four components by the 4-vector norm.
    pub fn normalize(self) -> Result<Self, MathError> {
        let norm = (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt();
        if norm == 0.0 || !norm.is_finite() {
            return Err(MathError::DegenerateVector { norm });
        }
        Ok(Self::new(
            self.x / norm,
            self.y / norm,
            self.z / norm,
            self.w / norm,
        ))
    }

    /// The (x, y, z) part.
    pub fn vector(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Hamilton product.
impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, r: Quaternion) -> Quaternion {
        let l = self;
        Quaternion::new(
            l.x * r.w + l.w * r.x + l.y * r.z - l.z * r.y,
            l.y * r.w + l.w * r.y + l.z * r.x - l.x * r.z,
            l.z * r.w + l.w * r.z + l.x * r.y - l.y * r.x,
            l.w * r.w - l.x * r.x - l.y * r.y - l.z * r.z,
        )
    }
}

/// Product with a pure quaternion `(v, 0)`.
impl Mul<Vector3> for Quaternion {
    type Output = Quaternion;

    fn mul(self, v: Vector3) -> Quaternion {
        let l = self;
        Quaternion::new(
            l.w * v.x + l.y * v.z - l.z * v.y,
            l.w * v.y + l.z * v.x - l.x * v.z,
            l.w * v.z + l.x * v.y - l.y * v.x,
            -l.x * v.x - l.y * v.y - l.z * v.z,
        )
    }
}
