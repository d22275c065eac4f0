use crate::quaternion::Quaternion;
use crate::types::Vector3;

/// Errors from vector math.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MathError {
    #[error("cannot normalize a degenerate vector (norm = {norm})")]
    DegenerateVector { norm: f64 },
}

/// Degrees to radians.
pub fn to_radian(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Radians to degrees.
pub fn to_degree(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Divide `v` by its own norm.
pub fn normalize(v: Vector3) -> Result<Vector3, MathError> {
    let norm = v.length();
    if norm == 0.0 || !norm.is_finite() {
        return Err(MathError::DegenerateVector { norm });
    }
    Ok(v / norm)
}

/// Rotate `v` by `angle` degrees about `axis` using `q * v * q⁻¹`.
///
/// `axis` must already be unit length. The scalar part of the product is
/// discarded.
pub fn rotate(v: Vector3, angle: f64, axis: Vector3) -> Vector3 {
    let rotation = Quaternion::from_axis_angle(axis, angle);
    let rotated = rotation * v * rotation.conjugate();
    rotated.vector()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: Vector3, b: Vector3) -> bool {
        (a - b).abs().max_element() < EPS
    }

    #[test]
    fn degree_radian_conversion() {
        assert!((to_radian(180.0) - std::f64::consts::PI).abs() < EPS);
        assert!((to_degree(std::f64::consts::FRAC_PI_2) - 90.0).abs() < EPS);
        assert!((to_degree(to_radian(37.5)) - 37.5).abs() < EPS);
    }

    #[test]
    fn normalize_unit_length() {
        let n = normalize(Vector3::new(3.0, 0.0, 4.0)).unwrap();
        assert!((n.length() - 1.0).abs() < EPS);
        assert!(approx(n, Vector3::new(0.6, 0.0, 0.8)));
    }

    #[test]
    fn normalize_zero_vector_fails() {
        let err = normalize(Vector3::ZERO).unwrap_err();
        assert_eq!(err, MathError::DegenerateVector { norm: 0.0 });
    }

    #[test]
    fn normalize_nan_fails() {
        assert!(normalize(Vector3::new(f64::NAN, 0.0, 1.0)).is_err());
    }

    #[test]
    fn rotate_zero_angle_is_identity() {
        let v = Vector3::new(1.0, -2.0, 0.5);
        for axis in [Vector3::X, Vector3::Y, Vector3::Z] {
            assert!(approx(rotate(v, 0.0, axis), v));
        }
    }

    #[test]
    fn rotate_full_revolution_is_identity() {
        let v = Vector3::new(0.3, 0.4, -1.2);
        let axis = normalize(Vector3::new(1.0, 1.0, 0.0)).unwrap();
        assert!(approx(rotate(v, 360.0, axis), v));
    }

    #[test]
    fn rotate_round_trip() {
        let v = Vector3::new(2.0, 1.0, -3.0);
        let axis = normalize(Vector3::new(-0.2, 0.7, 0.4)).unwrap();
        for theta in [12.5, 90.0, 181.0, -47.0] {
            let back = rotate(rotate(v, theta, axis), -theta, axis);
            assert!(approx(back, v), "theta={theta}");
        }
    }

    #[test]
    fn rotate_x_about_y_is_right_handed() {
        let r = rotate(Vector3::X, 90.0, Vector3::Y);
        assert!(approx(r, Vector3::new(0.0, 0.0, -1.0)));
        let r = rotate(Vector3::X, 270.0, Vector3::Y);
        assert!(approx(r, Vector3::Z));
    }

    #[test]
    fn rotate_preserves_length() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let r = rotate(v, 33.0, Vector3::Z);
        assert!((r.length() - v.length()).abs() < EPS);
    }
}
