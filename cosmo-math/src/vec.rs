//! Helpers for moving between 3D space and the 4D embedding.
//!
//! Dot products, cross products, norms and normalization come straight
//! from `nalgebra`; this module adds only what it lacks: lifting spatial
//! vectors into 4D with an explicit time component.

use nalgebra::{Vector3, Vector4};

/// The time-like basis vector `(0, 0, 0, 1)`.
pub fn time_axis() -> Vector4<f64> {
    Vector4::new(0.0, 0.0, 0.0, 1.0)
}

/// Lift a spatial vector into 4D with a zero time component.
pub fn spatial(v: &Vector3<f64>) -> Vector4<f64> {
    with_time(v, 0.0)
}

/// Lift a spatial vector into 4D with the given time component.
pub fn with_time(v: &Vector3<f64>, t: f64) -> Vector4<f64> {
    Vector4::new(v.x, v.y, v.z, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lifted_vectors_keep_their_spatial_dot_product() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-2.0, 0.5, 4.0);
        assert_relative_eq!(spatial(&a).dot(&spatial(&b)), a.dot(&b), epsilon = 1e-12);
    }

    #[test]
    fn time_axis_is_orthogonal_to_spatial_lifts() {
        let v = Vector3::new(0.3, -0.9, 2.7);
        assert_relative_eq!(time_axis().dot(&spatial(&v)), 0.0, epsilon = 1e-12);
        assert_relative_eq!(time_axis().norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn with_time_carries_the_component_through() {
        let v = with_time(&Vector3::new(1.0, 0.0, 0.0), 2.5);
        assert_relative_eq!(v.dot(&time_axis()), 2.5, epsilon = 1e-12);
    }
}
