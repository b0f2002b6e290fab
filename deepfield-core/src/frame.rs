//! Viewing angles and the 4D projection frame they span.

use nalgebra::{Vector3, Vector4};
use serde::{Deserialize, Serialize};

use cosmo_math::{orthonormal_triad, radial_unit_vector, spatial, time_axis};

const RADIANS_PER_HOUR: f64 = std::f64::consts::PI / 12.0;
const RADIANS_PER_DEGREE: f64 = std::f64::consts::PI / 180.0;

/// The three user-chosen viewing angles, stored in radians.
///
/// Users supply `ra1` and `beta` in hours (0..24) and `dec1` in degrees
/// (-90..90); the conversion happens once, here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewAngles {
    ra1: f64,
    dec1: f64,
    beta: f64,
}

impl Default for ViewAngles {
    fn default() -> Self {
        Self {
            ra1: 0.0,
            dec1: 0.0,
            beta: 0.0,
        }
    }
}

impl ViewAngles {
    /// Angles from user units: hours, degrees, hours.
    pub fn from_user(ra1_hours: f64, dec1_degrees: f64, beta_hours: f64) -> Self {
        Self {
            ra1: ra1_hours * RADIANS_PER_HOUR,
            dec1: dec1_degrees * RADIANS_PER_DEGREE,
            beta: beta_hours * RADIANS_PER_HOUR,
        }
    }

    /// Angles already in radians.
    pub fn from_radians(ra1: f64, dec1: f64, beta: f64) -> Self {
        Self { ra1, dec1, beta }
    }

    pub fn ra1(&self) -> f64 {
        self.ra1
    }

    pub fn dec1(&self) -> f64 {
        self.dec1
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn ra1_hours(&self) -> f64 {
        self.ra1 / RADIANS_PER_HOUR
    }

    pub fn dec1_degrees(&self) -> f64 {
        self.dec1 / RADIANS_PER_DEGREE
    }

    pub fn beta_hours(&self) -> f64 {
        self.beta / RADIANS_PER_HOUR
    }
}

/// Four orthonormal 4D basis vectors spanning the time axis and the three
/// spatial embedding axes.
///
/// `E0` is the fixed time-like axis `(0,0,0,1)`. `E1` points along the
/// viewing direction, `E2` is that direction's orthogonal companion
/// rotated by `beta` within its normal plane, and `E3` completes the
/// right-handed spatial triple. All three spatial vectors carry a zero
/// time component, so the whole basis is orthonormal by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionFrame {
    basis: [Vector4<f64>; 4],
}

impl ProjectionFrame {
    /// Build the frame for the given viewing angles.
    pub fn from_angles(angles: &ViewAngles) -> Self {
        let p1 = radial_unit_vector(angles.ra1(), angles.dec1());
        let (eta1, eta2) = orthonormal_triad(&p1);

        // Rotate within the {eta1, eta2} plane by beta, then close the
        // triple with a cross product.
        let p2: Vector3<f64> = angles.beta().cos() * eta1 + angles.beta().sin() * eta2;
        let p3 = p1.cross(&p2);

        Self {
            basis: [time_axis(), spatial(&p1), spatial(&p2), spatial(&p3)],
        }
    }

    /// Basis vector by index: 0 is the time axis, 1..=3 the spatial axes.
    pub fn basis(&self, index: usize) -> &Vector4<f64> {
        &self.basis[index]
    }

    /// All four basis vectors, `E0` first.
    pub fn basis_vectors(&self) -> &[Vector4<f64>; 4] {
        &self.basis
    }
}

impl Default for ProjectionFrame {
    fn default() -> Self {
        Self::from_angles(&ViewAngles::default())
    }
}
