//! 4x4 matrix builders.
//!
//! Matrices are written here row by row (`from_rows`) and act on column
//! vectors, so `A * B` applies `B` first. [`to_row_major`] yields the
//! 16-element layout used for uniform upload.

use flycam_common::{Vector3, normalize, to_radian};
use glam::DMat4;
use serde::{Deserialize, Serialize};

use crate::pipeline::{PipelineError, ProjectionParams};

/// How the scaling and rotation matrices are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixConvention {
    /// Diagonal `(sx, sy, sz, 1)` and right-handed elementary rotations.
    #[default]
    Standard,
    /// Bit-exact with the legacy demo output: the scaling diagonal repeats
    /// `sz` in place of `sx`, and the elementary rotations have their sine and
    /// cosine entries swapped.
    ///
    /// The swapped matrices are reflections, not rotations: each has
    /// determinant -1 and turns the model inside out. Kept only to reproduce
    /// old output, hence `Standard` is the default.
    Legacy,
}

/// Build a matrix from four rows.
pub fn from_rows(rows: [[f64; 4]; 4]) -> DMat4 {
    DMat4::from_cols_array_2d(&rows).transpose()
}

/// Flatten a matrix row by row.
pub fn to_row_major(m: &DMat4) -> [f64; 16] {
    m.transpose().to_cols_array()
}

pub fn scaling(scale: Vector3, convention: MatrixConvention) -> DMat4 {
    let (sx, sy, sz) = (scale.x, scale.y, scale.z);
    let first = match convention {
        MatrixConvention::Standard => sx,
        MatrixConvention::Legacy => sz,
    };
    from_rows([
        [first, 0.0, 0.0, 0.0],
        [0.0, sy, 0.0, 0.0],
        [0.0, 0.0, sz, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Identity with `(tx, ty, tz, 1)` as the last column.
pub fn translation(offset: Vector3) -> DMat4 {
    from_rows([
        [1.0, 0.0, 0.0, offset.x],
        [0.0, 1.0, 0.0, offset.y],
        [0.0, 0.0, 1.0, offset.z],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// `Rz · Ry · Rx` from Euler angles in degrees. A zero angle contributes the
/// identity.
pub fn rotation(degrees: Vector3, convention: MatrixConvention) -> DMat4 {
    let rx = axis_rotation(degrees.x, convention, |s, c, legacy| {
        if legacy {
            [[1.0, 0.0, 0.0], [0.0, s, c], [0.0, c, -s]]
        } else {
            [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]
        }
    });
    let ry = axis_rotation(degrees.y, convention, |s, c, legacy| {
        if legacy {
            [[s, 0.0, c], [0.0, 1.0, 0.0], [c, 0.0, -s]]
        } else {
            [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]
        }
    });
    let rz = axis_rotation(degrees.z, convention, |s, c, legacy| {
        if legacy {
            [[s, c, 0.0], [c, -s, 0.0], [0.0, 0.0, 1.0]]
        } else {
            [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]]
        }
    });
    rz * ry * rx
}

fn axis_rotation(
    degrees: f64,
    convention: MatrixConvention,
    rows: impl Fn(f64, f64, bool) -> [[f64; 3]; 3],
) -> DMat4 {
    if degrees == 0.0 {
        return DMat4::IDENTITY;
    }
    let (s, c) = to_radian(degrees).sin_cos();
    let r = rows(s, c, convention == MatrixConvention::Legacy);
    from_rows([
        [r[0][0], r[0][1], r[0][2], 0.0],
        [r[1][0], r[1][1], r[1][2], 0.0],
        [r[2][0], r[2][1], r[2][2], 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Perspective projection mapping view depth `[z_near, z_far]` to `[-1, 1]`
/// with `w = z`.
pub fn perspective(params: &ProjectionParams) -> DMat4 {
    let aspect = params.width / params.height;
    let z_range = params.z_near - params.z_far;
    let half_fov_tan = to_radian(params.fov / 2.0).tan();
    let a = -(params.z_near + params.z_far) / z_range;
    let b = 2.0 * params.z_far * params.z_near / z_range;
    from_rows([
        [1.0 / (half_fov_tan * aspect), 0.0, 0.0, 0.0],
        [0.0, 1.0 / half_fov_tan, 0.0, 0.0],
        [0.0, 0.0, a, b],
        [0.0, 0.0, 1.0, 0.0],
    ])
}

/// World-to-camera rotation with rows `u, v, n`.
pub fn camera_rotation(target: Vector3, up: Vector3) -> Result<DMat4, PipelineError> {
    let invalid = |what: &str| {
        PipelineError::InvalidCameraConfiguration(format!(
            "{what} (target {target}, up {up})"
        ))
    };
    let n = normalize(target).map_err(|_| invalid("zero-length target"))?;
    let up = normalize(up).map_err(|_| invalid("zero-length up"))?;
    let u = normalize(up.cross(target)).map_err(|_| invalid("target parallel to up"))?;
    let v = n.cross(u);
    Ok(from_rows([
        [u.x, u.y, u.z, 0.0],
        [v.x, v.y, v.z, 0.0],
        [n.x, n.y, n.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]))
}
