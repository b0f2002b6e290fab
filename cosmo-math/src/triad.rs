//! Orthonormal spatial triads from celestial pointing directions.
//!
//! A viewing direction on the unit sphere determines the first axis of a
//! projection frame; the remaining two axes are built by crossing against
//! an auxiliary coordinate axis chosen to avoid degeneracy. The same
//! construction appears in tangent-plane star projectors, here kept free of
//! any detector geometry.

use nalgebra::Vector3;

/// Degeneracy guard for the auxiliary axis choice: one arc-second,
/// 2*PI / (24 * 60 * 60), rounded to the literal the comparison uses.
pub const AUX_AXIS_EPSILON: f64 = 1e-5;

/// Unit vector toward `(ra, dec)`, both in radians.
pub fn radial_unit_vector(ra: f64, dec: f64) -> Vector3<f64> {
    Vector3::new(
        ra.cos() * dec.cos(),
        ra.sin() * dec.cos(),
        dec.sin(),
    )
}

/// Complete the unit vector `p1` into an orthonormal triad.
///
/// Returns `(eta1, eta2)` with `eta1 = normalize(p1 x aux)` and
/// `eta2 = p1 x eta1`, where `aux` is the unit X axis unless `p1` points
/// within [`AUX_AXIS_EPSILON`] of it, in which case the unit Y axis is
/// used instead. `p1` must be unit length; the axis switch keeps the
/// cross product away from zero at the +X pole.
pub fn orthonormal_triad(p1: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let aux = if (p1.x - 1.0).abs() > AUX_AXIS_EPSILON {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let eta1 = p1.cross(&aux).normalize();
    let eta2 = p1.cross(&eta1);
    (eta1, eta2)
}
