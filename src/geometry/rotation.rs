//! Rotation tensors between unit directions.

use nalgebra::{Matrix3, Vector3};

const SMALL: f64 = 1e-15;

/// Rotation tensor `R` with `R n1 = n2` for unit vectors `n1`, `n2`.
///
/// `R = (n1·n2) I + (1 − n1·n2) n3 n3ᵀ / |n3|² + (n2 n1ᵀ − n1 n2ᵀ)` with
/// `n3 = n1 × n2`. Parallel inputs give the identity; anti-parallel inputs
/// give the reflection `I − 2 n1 n1ᵀ`.
pub fn rotation_tensor(n1: &Vector3<f64>, n2: &Vector3<f64>) -> Matrix3<f64> {
    let s = n1.dot(n2);
    let n3 = n1.cross(n2);
    let mag_sqr_n3 = n3.norm_squared();
    if mag_sqr_n3 > SMALL {
        Matrix3::identity() * s + (n3 * n3.transpose()) * ((1.0 - s) / mag_sqr_n3)
            + (n2 * n1.transpose() - n1 * n2.transpose())
    } else if s < 0.0 {
        Matrix3::identity() - 2.0 * (n1 * n1.transpose())
    } else {
        Matrix3::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_first_onto_second() {
        let n1 = Vector3::new(0.0, 1.0, 0.0);
        let n2 = Vector3::new(1.0, 0.0, 0.0);
        let r = rotation_tensor(&n1, &n2);
        assert!((r * n1 - n2).norm() < 1e-12);
        assert!((r * r.transpose() - Matrix3::identity()).norm() < 1e-12);
        assert!((r.determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn oblique_rotation_is_orthogonal() {
        let n1 = Vector3::new(1.0, 1.0, 1.0).normalize();
        let n2 = Vector3::new(1.0, 0.0, 0.0);
        let r = rotation_tensor(&n1, &n2);
        assert!((r * n1 - n2).norm() < 1e-12);
        assert!((r.transpose() * r - Matrix3::identity()).norm() < 1e-12);
    }

    #[test]
    fn parallel_is_identity() {
        let n = Vector3::new(0.0, 0.0, 1.0);
        assert_eq!(rotation_tensor(&n, &n), Matrix3::identity());
    }
}
